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

#[cfg(feature = "serde")]
use std::path::Path;
#[cfg(feature = "serde")]
use std::{fs, io};

#[cfg(feature = "serde")]
use amplify::IoError;
use indexmap::IndexMap;

use super::ResolveContract;
use crate::{ContractAddress, ContractHandle, ContractId, NetworkId};

/// Address of a contract deployed on a network.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Display)]
#[display("{contract} on {network} at {address}")]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", rename_all = "camelCase")
)]
pub struct Deployment {
    pub contract: ContractId,
    pub network: NetworkId,
    pub address: ContractAddress,
}

impl Deployment {
    pub fn new(
        contract: ContractId,
        network: impl Into<NetworkId>,
        address: impl Into<ContractAddress>,
    ) -> Self {
        Self { contract, network: network.into(), address: address.into() }
    }
}

#[derive(Debug, Display, Error, From)]
#[display(doc_comments)]
pub enum DeploymentError {
    /// {contract} contract is listed more than once for the {network} network.
    Duplicate { contract: ContractId, network: NetworkId },

    #[cfg(feature = "serde")]
    #[from]
    #[from(io::Error)]
    #[display(inner)]
    File(IoError),

    /// invalid deployments configuration: {0}
    #[cfg(feature = "serde")]
    #[from]
    Yaml(serde_yaml::Error),
}

/// Registry of contract deployments per network.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Deployments(IndexMap<(ContractId, NetworkId), ContractAddress>);

impl Deployments {
    pub fn new() -> Self { Self::default() }

    pub fn with(
        deployments: impl IntoIterator<Item = Deployment>,
    ) -> Result<Self, DeploymentError> {
        let mut registry = Self::new();
        for deployment in deployments {
            registry.insert(deployment)?;
        }
        Ok(registry)
    }

    pub fn insert(&mut self, deployment: Deployment) -> Result<(), DeploymentError> {
        let Deployment { contract, network, address } = deployment;
        if self.0.contains_key(&(contract, network.clone())) {
            return Err(DeploymentError::Duplicate { contract, network });
        }
        self.0.insert((contract, network), address);
        Ok(())
    }

    #[inline]
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
    #[inline]
    pub fn len(&self) -> usize { self.0.len() }

    pub fn iter(&self) -> impl Iterator<Item = Deployment> + '_ {
        self.0
            .iter()
            .map(|((contract, network), address)| Deployment {
                contract: *contract,
                network: network.clone(),
                address: address.clone(),
            })
    }

    /// Networks on which the contract is deployed.
    pub fn networks(&self, contract: ContractId) -> impl Iterator<Item = &NetworkId> + '_ {
        self.0
            .keys()
            .filter(move |(id, _)| *id == contract)
            .map(|(_, network)| network)
    }

    /// Parses a YAML list of `{contract, network, address}` entries.
    #[cfg(feature = "serde")]
    pub fn from_yaml(yaml: &str) -> Result<Self, DeploymentError> {
        let deployments: Vec<Deployment> = serde_yaml::from_str(yaml)?;
        Self::with(deployments)
    }

    #[cfg(feature = "serde")]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DeploymentError> {
        let path = path.as_ref();
        debug!("Loading contract deployments from `{}`", path.display());
        let yaml = fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    #[cfg(feature = "serde")]
    pub fn to_yaml(&self) -> Result<String, DeploymentError> {
        let deployments = self.iter().collect::<Vec<_>>();
        Ok(serde_yaml::to_string(&deployments)?)
    }
}

impl ResolveContract for Deployments {
    fn resolve(&self, contract: ContractId, network: &NetworkId) -> Option<ContractHandle> {
        self.0
            .get(&(contract, network.clone()))
            .map(|address| ContractHandle {
                contract,
                network: network.clone(),
                address: address.clone(),
            })
    }
}
