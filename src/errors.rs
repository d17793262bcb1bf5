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

use crate::chain::ChainError;
use crate::decoder::DecodeError;
use crate::request::ValidationError;

/// Failure of a read; the previously loaded fields are retained.
#[derive(Clone, PartialEq, Eq, Debug, Display, Error, From)]
#[display(doc_comments)]
pub enum FetchError {
    #[from]
    #[display(inner)]
    Decode(DecodeError),

    /// unable to query contract: {0}
    #[from]
    Transport(ChainError),
}

impl FetchError {
    /// Whether the contract executed the call and rejected it.
    pub fn is_execution(&self) -> bool {
        matches!(self, FetchError::Decode(err) if err.is_execution())
    }
}

/// Part of the capability bundle which must be present to submit a transaction.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Display)]
pub enum Missing {
    #[display("contract handle")]
    Handle,

    #[display("signer")]
    Signer,

    #[display("account")]
    Account,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Display, Error)]
#[display(doc_comments)]
pub enum PreconditionError {
    /// wallet is not connected: {0} is missing.
    NotConnected(Missing),

    /// another transaction is still being submitted.
    SubmitInFlight,

    /// contract session was closed.
    SessionClosed,
}

/// Failure of a mutating call; the previously loaded fields are retained.
#[derive(Clone, PartialEq, Eq, Debug, Display, Error, From)]
#[display(doc_comments)]
pub enum SubmitError {
    #[from]
    #[display(inner)]
    Validation(ValidationError),

    #[from]
    #[display(inner)]
    Precondition(PreconditionError),

    /// transaction failed: {0}
    #[from]
    Submission(ChainError),

    /// contract session was closed before the transaction outcome was applied.
    Cancelled,
}

impl SubmitError {
    /// Whether the error happened before anything was sent to the chain.
    pub fn is_local(&self) -> bool {
        matches!(self, SubmitError::Validation(_) | SubmitError::Precondition(_))
    }
}
