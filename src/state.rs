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

//! Sync state store: last known contract fields and the read/write lifecycle.
//!
//! All transitions are synchronous and side-effect free; the runtime calls them around the
//! suspension points of the remote calls. Reads and writes are tracked on two independent axes:
//!
//! - read: `Idle -> Fetching -> {Loaded, FetchError}`, back to `Idle` when no contract is bound;
//! - write: `Idle -> Submitting -> {Submitted, SubmitError} -> Idle`.

use chrono::{DateTime, Utc};

use crate::errors::{FetchError, PreconditionError};
use crate::fields::FieldSet;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Display, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", rename_all = "camelCase")
)]
pub enum ReadStatus {
    #[default]
    #[display("idle")]
    Idle,

    #[display("fetching")]
    Fetching,

    #[display("loaded")]
    Loaded,

    #[display("fetch-error")]
    FetchError,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Display, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", rename_all = "camelCase")
)]
pub enum WriteStatus {
    #[default]
    #[display("idle")]
    Idle,

    #[display("submitting")]
    Submitting,

    #[display("submitted")]
    Submitted,

    #[display("submit-error")]
    SubmitError,
}

/// Staleness token identifying an issued fetch. Only the latest issued token may update the
/// fields.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Display)]
#[display("#{0}")]
pub struct FetchToken(u64);

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum FetchOutcome {
    /// No contract handle is bound, so nothing was fetched.
    NotReady,

    /// Fields were replaced with the fetched values.
    Loaded(FieldSet),

    /// The fetch failed and the previous fields were retained.
    Failed(FetchError),

    /// A more recent fetch was issued; the result was dropped.
    Superseded,

    /// The session was closed; the result was dropped.
    Cancelled,
}

impl FetchOutcome {
    pub fn is_loaded(&self) -> bool { matches!(self, FetchOutcome::Loaded(_)) }

    pub fn fields(&self) -> Option<&FieldSet> {
        match self {
            FetchOutcome::Loaded(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            FetchOutcome::Failed(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SyncState {
    fields: FieldSet,
    read: ReadStatus,
    write: WriteStatus,
    latest: u64,
    loaded_at: Option<DateTime<Utc>>,
    closed: bool,
}

impl SyncState {
    pub fn new() -> Self { Self::default() }

    #[inline]
    pub fn fields(&self) -> &FieldSet { &self.fields }
    #[inline]
    pub fn read_status(&self) -> ReadStatus { self.read }
    #[inline]
    pub fn write_status(&self) -> WriteStatus { self.write }
    #[inline]
    pub fn loaded_at(&self) -> Option<DateTime<Utc>> { self.loaded_at }
    #[inline]
    pub fn is_closed(&self) -> bool { self.closed }

    pub fn is_latest(&self, token: FetchToken) -> bool { token.0 == self.latest }

    /// Issues a new staleness token, superseding all fetches in flight.
    ///
    /// Returns `None` once the session is closed.
    pub fn begin_fetch(&mut self) -> Option<FetchToken> {
        if self.closed {
            return None;
        }
        self.latest += 1;
        self.read = ReadStatus::Fetching;
        trace!("issued fetch token #{}", self.latest);
        Some(FetchToken(self.latest))
    }

    /// Completes a fetch which had no contract to read from.
    pub fn settle_not_ready(&mut self, token: FetchToken) {
        if !self.closed && self.is_latest(token) {
            self.read = ReadStatus::Idle;
        }
    }

    /// Applies the result of the fetch identified by `token`.
    ///
    /// Results of superseded fetches and results arriving after the session was closed are
    /// dropped without touching the state. A failed fetch keeps the previously loaded fields.
    pub fn apply_fetch(
        &mut self,
        token: FetchToken,
        result: Result<FieldSet, FetchError>,
    ) -> FetchOutcome {
        if self.closed {
            return FetchOutcome::Cancelled;
        }
        if !self.is_latest(token) {
            trace!("dropping result of fetch {token} superseded by #{}", self.latest);
            return FetchOutcome::Superseded;
        }
        match result {
            Ok(fields) => {
                self.fields = fields.clone();
                self.read = ReadStatus::Loaded;
                self.loaded_at = Some(Utc::now());
                FetchOutcome::Loaded(fields)
            }
            Err(err) => {
                self.read = ReadStatus::FetchError;
                FetchOutcome::Failed(err)
            }
        }
    }

    /// Enters `Submitting`, which is possible only from `Idle` or `SubmitError`.
    pub fn begin_submit(&mut self) -> Result<(), PreconditionError> {
        if self.closed {
            return Err(PreconditionError::SessionClosed);
        }
        match self.write {
            WriteStatus::Idle | WriteStatus::SubmitError => {
                self.write = WriteStatus::Submitting;
                Ok(())
            }
            WriteStatus::Submitting | WriteStatus::Submitted => {
                Err(PreconditionError::SubmitInFlight)
            }
        }
    }

    /// Records the outcome of the submission. Returns `false` if the session was closed meanwhile
    /// and the outcome must be dropped.
    pub fn finish_submit(&mut self, succeeded: bool) -> bool {
        if self.closed {
            return false;
        }
        self.write = if succeeded { WriteStatus::Submitted } else { WriteStatus::SubmitError };
        true
    }

    /// Returns the write axis to `Idle` once the submission outcome was reported.
    pub fn settle_write(&mut self) {
        if matches!(self.write, WriteStatus::Submitted | WriteStatus::SubmitError) {
            self.write = WriteStatus::Idle;
        }
    }

    /// Releases the `Submitting` flag of a submission which was dropped before completing.
    pub fn abandon_submit(&mut self) {
        if self.write == WriteStatus::Submitting {
            self.write = WriteStatus::Idle;
        }
    }

    /// Ends the session: nothing issued before or after this call updates the state anymore.
    pub fn close(&mut self) {
        self.closed = true;
        self.latest += 1;
    }
}
