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

//! Boundary to the external chain client.
//!
//! Wire encoding of contract calls, transaction construction, nonce management and inclusion
//! tracking are owned by the chain client; the runtime sees only the decoded-but-untyped call
//! output and the inclusion receipt.

use std::rc::Rc;

use serde_json::Value;

use crate::{AccountAddress, ContractHandle};

/// Raw result of a read-only contract call, as produced by the chain client ABI layer.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum CallOutcome {
    /// The call executed and returned a value.
    Returned(Value),

    /// The contract reverted or trapped during the call.
    Reverted(String),
}

/// Confirmation that a submitted transaction was included by the ledger.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Display)]
#[display("{tx_hash}")]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", rename_all = "camelCase")
)]
pub struct InclusionReceipt {
    pub tx_hash: String,
    pub block: Option<u64>,
}

impl InclusionReceipt {
    pub fn new(tx_hash: impl Into<String>, block: Option<u64>) -> Self {
        Self { tx_hash: tx_hash.into(), block }
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Display, Error)]
#[display(doc_comments)]
pub enum ChainError {
    /// cannot connect to the chain node.
    Connectivity,

    /// the account owner refused to sign the transaction.
    SigningRejected,

    /// the transaction was rejected by the ledger: {0}
    Rejected(String),

    /// the transaction was not included in time.
    Timeout,

    /// the chain node has returned an unexpected response: {0}
    Protocol(String),
}

/// Read-only contract calls.
#[allow(async_fn_in_trait)]
pub trait ContractQuery {
    async fn query(
        &self,
        handle: &ContractHandle,
        method: &'static str,
    ) -> Result<CallOutcome, ChainError>;
}

/// Chain signing capability: signs a mutating call on behalf of an account, submits it and waits
/// for its inclusion.
#[allow(async_fn_in_trait)]
pub trait SignAndSubmit {
    async fn sign_and_submit(
        &self,
        handle: &ContractHandle,
        account: &AccountAddress,
        method: &'static str,
        args: Vec<Value>,
    ) -> Result<InclusionReceipt, ChainError>;
}

impl<T: ContractQuery> ContractQuery for Rc<T> {
    async fn query(
        &self,
        handle: &ContractHandle,
        method: &'static str,
    ) -> Result<CallOutcome, ChainError> {
        T::query(self, handle, method).await
    }
}

impl<T: SignAndSubmit> SignAndSubmit for Rc<T> {
    async fn sign_and_submit(
        &self,
        handle: &ContractHandle,
        account: &AccountAddress,
        method: &'static str,
        args: Vec<Value>,
    ) -> Result<InclusionReceipt, ChainError> {
        T::sign_and_submit(self, handle, account, method, args).await
    }
}
