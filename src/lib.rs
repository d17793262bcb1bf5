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

//! Client-side synchronization of ink! contract state.
//!
//! The crate keeps the last known field values of a deployed contract, reads them through an
//! asynchronous chain client, submits signed mutating calls and reconciles the local state with
//! their outcome. Chain access, signing and user notifications are reached only through the
//! traits in [`chain`], [`resolvers`] and [`notify`]; everything runs on a single-threaded event
//! loop, so the futures returned by [`SyncRuntime`] are not `Send`.

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

#[macro_use]
extern crate amplify;
#[cfg(feature = "serde")]
#[macro_use]
extern crate serde_crate as serde;
#[macro_use]
extern crate log;

pub mod chain;
mod contract;
pub mod decoder;
mod errors;
pub mod fields;
mod info;
pub mod notify;
pub mod request;
pub mod resolvers;
mod runtime;
pub mod state;

pub use chain::{CallOutcome, ChainError, ContractQuery, InclusionReceipt, SignAndSubmit};
pub use contract::{AccountAddress, ContractAddress, ContractHandle, ContractId, NetworkId};
pub use decoder::{decode, DecodeError, DecodeResult};
pub use errors::{FetchError, Missing, PreconditionError, SubmitError};
pub use fields::{FieldKind, FieldSet, FieldShape, FieldSpec, FieldValue};
pub use info::SyncSnapshot;
pub use notify::{LogNotifier, Notify, Report, ReportKind};
pub use request::{GreetingRequest, Mutation, UpdateRequest, ValidationError};
pub use resolvers::{Deployment, DeploymentError, Deployments, NoResolver, ResolveContract};
pub use runtime::{Bindings, SubmitOutcome, SyncRuntime};
pub use state::{FetchOutcome, FetchToken, ReadStatus, SyncState, WriteStatus};
