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

//! Contract handle resolution.

mod deployments;

pub use deployments::{Deployment, DeploymentError, Deployments};

use crate::{ContractHandle, ContractId, NetworkId};

/// Resolves a logical contract to a handle on the active network.
///
/// `None` means the contract is not reachable yet (no wallet connection, no deployment on the
/// network); the runtime treats it as a quiescent state rather than an error.
pub trait ResolveContract {
    fn resolve(&self, contract: ContractId, network: &NetworkId) -> Option<ContractHandle>;
}

impl<R: ResolveContract + ?Sized> ResolveContract for &R {
    fn resolve(&self, contract: ContractId, network: &NetworkId) -> Option<ContractHandle> {
        R::resolve(self, contract, network)
    }
}

/// Resolver used before any network connection is established.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct NoResolver;

impl ResolveContract for NoResolver {
    fn resolve(&self, _contract: ContractId, _network: &NetworkId) -> Option<ContractHandle> {
        None
    }
}
