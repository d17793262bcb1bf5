// Contract state synchronization runtime for the Tipper dapp
//
// SPDX-License-Identifier: Apache-2.0
//
// Written in 2025 by the Tipper developers
//
// Copyright (C) 2025 Tipper developers. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not use this file except
// in compliance with the License. You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software distributed under the License
// is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express
// or implied. See the License for the specific language governing permissions and limitations under
// the License.

//! Typed contract fields and the shapes they are decoded from.

use core::slice;

use indexmap::IndexMap;

pub const MESSAGE: &str = "message";
pub const RECIPIENT: &str = "recipient";
pub const QUANTITY: &str = "quantity";

/// Output of the Tipper `tip` message: `{ message, to, pizzas }`.
pub const TIP_SHAPE: FieldShape = FieldShape::Record(&[
    FieldSpec::new(MESSAGE, "message", FieldKind::Text),
    FieldSpec::new(RECIPIENT, "to", FieldKind::Account),
    FieldSpec::new(QUANTITY, "pizzas", FieldKind::Quantity),
]);

/// Output of the Greeter `greet` message: the greeting string itself.
pub const GREETING_SHAPE: FieldShape =
    FieldShape::Scalar(FieldSpec::new(MESSAGE, MESSAGE, FieldKind::Text));

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Display)]
#[display(lowercase)]
pub enum FieldKind {
    /// Arbitrary UTF-8 text.
    Text,

    /// Non-empty account address.
    Account,

    /// Unsigned 32-bit amount.
    Quantity,
}

#[derive(Clone, PartialEq, Eq, Hash, Debug, Display)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", untagged)
)]
#[display(inner)]
pub enum FieldValue {
    Quantity(u32),
    Text(String),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Quantity(_) => None,
        }
    }

    pub fn as_quantity(&self) -> Option<u32> {
        match self {
            FieldValue::Quantity(n) => Some(*n),
            FieldValue::Text(_) => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self { FieldValue::Text(s.to_owned()) }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self { FieldValue::Text(s) }
}

impl From<u32> for FieldValue {
    fn from(n: u32) -> Self { FieldValue::Quantity(n) }
}

/// Where a field is found in the call output and how it is decoded.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct FieldSpec {
    /// Name of the field in the [`FieldSet`].
    pub name: &'static str,
    /// Key of the field inside a record output; unused for scalar outputs.
    pub key: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(name: &'static str, key: &'static str, kind: FieldKind) -> Self {
        Self { name, key, kind }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum FieldShape {
    /// The call returns the value of a single field.
    Scalar(FieldSpec),

    /// The call returns a record with one key per field.
    Record(&'static [FieldSpec]),
}

impl FieldShape {
    pub fn specs(&self) -> &[FieldSpec] {
        match self {
            FieldShape::Scalar(spec) => slice::from_ref(spec),
            FieldShape::Record(specs) => specs,
        }
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.specs().iter().map(|spec| spec.name)
    }
}

/// Last known values of the contract fields, keyed by field name.
///
/// A field which is absent from the set was never fetched.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize),
    serde(crate = "serde_crate", transparent)
)]
pub struct FieldSet(IndexMap<&'static str, FieldValue>);

impl FieldSet {
    pub fn new() -> Self { Self::default() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
    #[inline]
    pub fn len(&self) -> usize { self.0.len() }

    pub fn get(&self, name: &str) -> Option<&FieldValue> { self.0.get(name) }

    pub fn insert(&mut self, name: &'static str, value: impl Into<FieldValue>) -> &mut Self {
        self.0.insert(name, value.into());
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.0.iter().map(|(name, value)| (*name, value))
    }

    pub fn message(&self) -> Option<&str> { self.get(MESSAGE).and_then(FieldValue::as_str) }

    pub fn recipient(&self) -> Option<&str> { self.get(RECIPIENT).and_then(FieldValue::as_str) }

    pub fn quantity(&self) -> Option<u32> { self.get(QUANTITY).and_then(FieldValue::as_quantity) }
}

impl FromIterator<(&'static str, FieldValue)> for FieldSet {
    fn from_iter<T: IntoIterator<Item = (&'static str, FieldValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
