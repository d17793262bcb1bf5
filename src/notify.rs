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

//! Notification sink boundary and the adapter reporting operation outcomes to it.

use std::rc::Rc;

use crate::chain::InclusionReceipt;
use crate::errors::SubmitError;
use crate::state::FetchOutcome;
use crate::ContractId;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Display)]
#[display(lowercase)]
pub enum ReportKind {
    Success,
    Error,
}

/// Human-readable report of an operation outcome.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Display)]
#[display("{kind}: {message}")]
pub struct Report {
    pub kind: ReportKind,
    pub message: String,
}

impl Report {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: ReportKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: ReportKind::Error, message: message.into() }
    }
}

/// Receiver of user-facing notifications. Reports are fire-and-forget and never influence the
/// runtime control flow.
pub trait Notify {
    fn report(&self, report: Report);

    /// Signals that the form which produced a successfully submitted request may be cleared.
    fn reset_form(&self) {}
}

impl<N: Notify + ?Sized> Notify for Rc<N> {
    fn report(&self, report: Report) { N::report(self, report) }
    fn reset_form(&self) { N::reset_form(self) }
}

/// Notification sink which writes reports to the log.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct LogNotifier;

impl Notify for LogNotifier {
    fn report(&self, report: Report) {
        match report.kind {
            ReportKind::Success => info!("{}", report.message),
            ReportKind::Error => error!("{}", report.message),
        }
    }
}

/// Maps a fetch outcome to a report. Only failures are reported; superseded and cancelled fetches
/// stay silent.
pub fn fetch_report(contract: ContractId, outcome: &FetchOutcome) -> Option<Report> {
    match outcome {
        FetchOutcome::Failed(err) => {
            Some(Report::error(format!("Error while fetching {contract} state: {err}")))
        }
        FetchOutcome::NotReady
        | FetchOutcome::Loaded(_)
        | FetchOutcome::Superseded
        | FetchOutcome::Cancelled => None,
    }
}

/// Maps a submission result to a report. Cancelled submissions stay silent.
pub fn submit_report(
    contract: ContractId,
    result: Result<&InclusionReceipt, &SubmitError>,
) -> Option<Report> {
    match result {
        Ok(receipt) => Some(Report::success(format!(
            "Successfully updated {contract} in transaction {receipt}"
        ))),
        Err(SubmitError::Cancelled) => None,
        Err(err) => Some(Report::error(format!("Error while updating {contract}: {err}"))),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::chain::ChainError;
    use crate::errors::{FetchError, PreconditionError};
    use crate::fields::FieldSet;

    #[test]
    fn fetch_reports() {
        assert_eq!(fetch_report(ContractId::Tipper, &FetchOutcome::Superseded), None);
        assert_eq!(fetch_report(ContractId::Tipper, &FetchOutcome::Cancelled), None);
        assert_eq!(fetch_report(ContractId::Tipper, &FetchOutcome::NotReady), None);
        assert_eq!(fetch_report(ContractId::Tipper, &FetchOutcome::Loaded(FieldSet::new())), None);

        let outcome = FetchOutcome::Failed(FetchError::Transport(ChainError::Connectivity));
        let report = fetch_report(ContractId::Tipper, &outcome).unwrap();
        assert_eq!(report.kind, ReportKind::Error);
        assert!(report.message.starts_with("Error while fetching tipper state"));
    }

    #[test]
    fn submit_reports() {
        let receipt = InclusionReceipt::new("0xabcd", Some(12));
        let report = submit_report(ContractId::Greeter, Ok(&receipt)).unwrap();
        assert_eq!(report.kind, ReportKind::Success);
        assert!(report.message.ends_with("0xabcd"));

        let err = SubmitError::Precondition(PreconditionError::SubmitInFlight);
        let report = submit_report(ContractId::Greeter, Err(&err)).unwrap();
        assert_eq!(report.kind, ReportKind::Error);

        assert_eq!(submit_report(ContractId::Greeter, Err(&SubmitError::Cancelled)), None);
    }
}
