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

use core::str::FromStr;

use crate::fields::{FieldShape, GREETING_SHAPE, TIP_SHAPE};

/// Logical identifier of a contract known to the dapp.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Display)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", rename_all = "lowercase")
)]
#[display(lowercase)]
pub enum ContractId {
    /// Contract keeping a single greeting message.
    Greeter,

    /// Pizza tipper contract keeping the most recent tip.
    Tipper,
}

impl FromStr for ContractId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "greeter" => Ok(ContractId::Greeter),
            "tipper" => Ok(ContractId::Tipper),
            s => Err(s.to_string()),
        }
    }
}

impl ContractId {
    /// Read-only message returning the contract fields.
    pub fn query_method(self) -> &'static str {
        match self {
            ContractId::Greeter => "greet",
            ContractId::Tipper => "tip",
        }
    }

    /// Mutating message updating the contract fields.
    pub fn update_method(self) -> &'static str {
        match self {
            ContractId::Greeter => "setMessage",
            ContractId::Tipper => "setTip",
        }
    }

    /// Shape of the value returned by [`Self::query_method`].
    pub fn field_shape(self) -> FieldShape {
        match self {
            ContractId::Greeter => GREETING_SHAPE,
            ContractId::Tipper => TIP_SHAPE,
        }
    }
}

/// Identifier of a chain the dapp may be connected to, like `alephzero-testnet`.
#[derive(Wrapper, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, From, Display)]
#[wrapper(Deref)]
#[display(inner)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", transparent)
)]
pub struct NetworkId(String);

impl From<&str> for NetworkId {
    fn from(s: &str) -> Self { Self(s.to_owned()) }
}

/// On-chain address of a deployed contract instance.
#[derive(Wrapper, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, From, Display)]
#[wrapper(Deref)]
#[display(inner)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", transparent)
)]
pub struct ContractAddress(String);

impl From<&str> for ContractAddress {
    fn from(s: &str) -> Self { Self(s.to_owned()) }
}

/// Address of the account signing mutating calls.
#[derive(Wrapper, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, From, Display)]
#[wrapper(Deref)]
#[display(inner)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", transparent)
)]
pub struct AccountAddress(String);

impl From<&str> for AccountAddress {
    fn from(s: &str) -> Self { Self(s.to_owned()) }
}

/// Capability bound to a specific contract deployment on a specific network.
///
/// Two handles are the same connection if and only if they are equal; the runtime uses this to
/// decide whether re-binding must refresh the contract state.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Display)]
#[display("{contract}@{network}:{address}")]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", rename_all = "camelCase")
)]
pub struct ContractHandle {
    pub contract: ContractId,
    pub network: NetworkId,
    pub address: ContractAddress,
}

impl ContractHandle {
    pub fn new(
        contract: ContractId,
        network: impl Into<NetworkId>,
        address: impl Into<ContractAddress>,
    ) -> Self {
        Self { contract, network: network.into(), address: address.into() }
    }
}
