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

//! Mutating requests and their pre-submit validation.

use serde_json::Value;

use crate::ContractId;

#[derive(Clone, PartialEq, Eq, Debug, Display, Error)]
#[display(doc_comments)]
pub enum ValidationError {
    /// message must not be empty.
    EmptyMessage,

    /// recipient must not be empty.
    EmptyRecipient,

    /// number of pizzas must be at least 1.
    ZeroQuantity,

    /// number of pizzas '{0}' is not a positive whole number.
    Quantity(String),

    /// request for the {found} contract can't be sent to the {expected} contract.
    ContractMismatch { expected: ContractId, found: ContractId },
}

/// A validated, statically shaped call to a contract mutating message.
pub trait Mutation {
    fn contract(&self) -> ContractId;

    fn method(&self) -> &'static str { self.contract().update_method() }

    /// Checks the request before any network effect takes place.
    fn validate(&self) -> Result<(), ValidationError>;

    /// Positional message arguments handed to the signing capability.
    fn args(&self) -> Vec<Value>;
}

/// New tip submitted to the Tipper contract.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", rename_all = "camelCase")
)]
pub struct UpdateRequest {
    pub message: String,
    pub recipient: String,
    pub quantity: u32,
}

impl UpdateRequest {
    pub fn new(message: impl Into<String>, recipient: impl Into<String>, quantity: u32) -> Self {
        Self { message: message.into(), recipient: recipient.into(), quantity }
    }

    /// Constructs the request from raw form inputs. The message is kept as typed; the recipient and
    /// the quantity are trimmed.
    pub fn parse_form(
        message: &str,
        recipient: &str,
        quantity: &str,
    ) -> Result<Self, ValidationError> {
        let quantity = quantity.trim();
        let quantity = quantity
            .parse::<u32>()
            .map_err(|_| ValidationError::Quantity(quantity.to_owned()))?;
        let request = Self::new(message, recipient.trim(), quantity);
        request.validate()?;
        Ok(request)
    }
}

impl Mutation for UpdateRequest {
    fn contract(&self) -> ContractId { ContractId::Tipper }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.message.trim().is_empty() {
            return Err(ValidationError::EmptyMessage);
        }
        if self.recipient.trim().is_empty() {
            return Err(ValidationError::EmptyRecipient);
        }
        if self.quantity < 1 {
            return Err(ValidationError::ZeroQuantity);
        }
        Ok(())
    }

    fn args(&self) -> Vec<Value> {
        vec![
            Value::from(self.message.as_str()),
            Value::from(self.recipient.as_str()),
            Value::from(self.quantity),
        ]
    }
}

/// New greeting submitted to the Greeter contract.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", rename_all = "camelCase")
)]
pub struct GreetingRequest {
    pub message: String,
}

impl GreetingRequest {
    pub fn new(message: impl Into<String>) -> Self { Self { message: message.into() } }
}

impl Mutation for GreetingRequest {
    fn contract(&self) -> ContractId { ContractId::Greeter }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.message.trim().is_empty() {
            return Err(ValidationError::EmptyMessage);
        }
        Ok(())
    }

    fn args(&self) -> Vec<Value> { vec![Value::from(self.message.as_str())] }
}
