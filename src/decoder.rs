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

//! Output decoder turning raw call results into typed fields.

use serde_json::Value;

use crate::chain::CallOutcome;
use crate::fields::{FieldKind, FieldSet, FieldShape, FieldSpec, FieldValue};

pub type DecodeResult = Result<FieldSet, DecodeError>;

#[derive(Clone, PartialEq, Eq, Debug, Display, Error)]
#[display(doc_comments)]
pub enum DecodeError {
    /// contract execution failed: {0}
    Execution(String),

    /// call output is expected to be {expected}, but {found} was returned.
    Shape { expected: &'static str, found: String },

    /// call output has no '{key}' entry.
    Missing { key: &'static str },

    /// field '{field}' can't be decoded as {kind} from {value}.
    Field { field: &'static str, kind: FieldKind, value: String },
}

impl DecodeError {
    /// Whether the contract itself rejected the call, as opposed to returning a malformed output.
    pub fn is_execution(&self) -> bool { matches!(self, DecodeError::Execution(_)) }
}

/// Decodes the raw call result against the contract field shape.
///
/// Either all fields of the shape are decoded, or an error is returned; a partially decoded set is
/// never produced.
pub fn decode(raw: &CallOutcome, shape: &FieldShape) -> DecodeResult {
    let value = match raw {
        CallOutcome::Reverted(reason) => return Err(DecodeError::Execution(reason.clone())),
        CallOutcome::Returned(value) => unwrap_envelope(value)?,
    };

    let mut fields = FieldSet::new();
    match shape {
        FieldShape::Scalar(spec) => {
            fields.insert(spec.name, decode_field(spec, value)?);
        }
        FieldShape::Record(specs) => {
            let record = value.as_object().ok_or_else(|| DecodeError::Shape {
                expected: "a record",
                found: describe(value),
            })?;
            for spec in specs.iter() {
                let item = record
                    .get(spec.key)
                    .ok_or(DecodeError::Missing { key: spec.key })?;
                fields.insert(spec.name, decode_field(spec, item)?);
            }
        }
    }
    Ok(fields)
}

// ink! messages wrap their output into `Result<T, LangError>`, and contracts may return their own
// `Result<T, E>` inside it.
fn unwrap_envelope(mut value: &Value) -> Result<&Value, DecodeError> {
    loop {
        let Some(record) = value.as_object() else {
            return Ok(value);
        };
        if record.len() != 1 {
            return Ok(value);
        }
        if let Some(inner) = record.get("Ok").or_else(|| record.get("ok")) {
            value = inner;
        } else if let Some(err) = record.get("Err").or_else(|| record.get("err")) {
            return Err(DecodeError::Execution(text_of(err)));
        } else {
            return Ok(value);
        }
    }
}

fn decode_field(spec: &FieldSpec, value: &Value) -> Result<FieldValue, DecodeError> {
    let mismatch = || DecodeError::Field { field: spec.name, kind: spec.kind, value: describe(value) };
    match spec.kind {
        FieldKind::Text => value
            .as_str()
            .map(FieldValue::from)
            .ok_or_else(mismatch),
        FieldKind::Account => value
            .as_str()
            .filter(|s| !s.trim().is_empty())
            .map(FieldValue::from)
            .ok_or_else(mismatch),
        FieldKind::Quantity => {
            let quantity = match value {
                Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
                Value::String(s) => parse_grouped(s.trim()),
                _ => None,
            };
            quantity.map(FieldValue::Quantity).ok_or_else(mismatch)
        }
    }
}

// Plain digits or human-formatted thousands, like "1,000"; any other grouping is rejected.
fn parse_grouped(s: &str) -> Option<u32> {
    let mut groups = s.split(',');
    let head = groups.next()?;
    if head.is_empty() || (head.len() > 3 && s.contains(',')) {
        return None;
    }
    let mut digits = head.to_owned();
    for group in groups {
        if group.len() != 3 {
            return None;
        }
        digits.push_str(group);
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => s!("null"),
        Value::Bool(_) => s!("a boolean"),
        Value::Number(n) => format!("number {n}"),
        Value::String(s) => format!("string \"{s}\""),
        Value::Array(_) => s!("a list"),
        Value::Object(_) => s!("a record"),
    }
}
