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

use chrono::{DateTime, Utc};

use crate::{ContractHandle, ContractId, FieldSet, ReadStatus, WriteStatus};

/// Point-in-time view of a synchronized contract, suitable for rendering by a UI layer.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize),
    serde(crate = "serde_crate", rename_all = "camelCase")
)]
pub struct SyncSnapshot {
    pub contract: ContractId,
    pub handle: Option<ContractHandle>,
    pub read: ReadStatus,
    pub write: WriteStatus,
    pub fields: FieldSet,
    pub loaded_at: Option<DateTime<Utc>>,
}

impl SyncSnapshot {
    /// Whether the UI should show a busy indicator.
    pub fn is_busy(&self) -> bool {
        self.read == ReadStatus::Fetching || self.write == WriteStatus::Submitting
    }

    /// Whether a new transaction can be submitted, as far as the local state can tell.
    pub fn can_submit(&self) -> bool {
        self.handle.is_some() && matches!(self.write, WriteStatus::Idle | WriteStatus::SubmitError)
    }
}
