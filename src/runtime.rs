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

//! Contract sync runtime: query executor and transaction submitter bound to one contract.

use std::cell::RefCell;
use std::future::Future;
use std::rc::{Rc, Weak};

use serde_json::Value;

use crate::notify::{fetch_report, submit_report};
use crate::{
    decode, AccountAddress, ContractHandle, ContractId, ContractQuery, FetchError, FetchOutcome,
    FieldSet, FieldShape, InclusionReceipt, LogNotifier, Missing, Mutation, NetworkId, Notify,
    PreconditionError, ReadStatus, Report, ResolveContract, SignAndSubmit, SubmitError,
    SyncSnapshot, SyncState, ValidationError, WriteStatus,
};

/// Capability bundle the runtime is bound to: the resolved contract handle, the wallet signer and
/// the selected account. Each part may be absent while the wallet is not connected.
pub struct Bindings<S> {
    pub handle: Option<ContractHandle>,
    pub signer: Option<Rc<S>>,
    pub account: Option<AccountAddress>,
}

impl<S> Clone for Bindings<S> {
    fn clone(&self) -> Self {
        Self {
            handle: self.handle.clone(),
            signer: self.signer.clone(),
            account: self.account.clone(),
        }
    }
}

impl<S> Default for Bindings<S> {
    fn default() -> Self { Self { handle: None, signer: None, account: None } }
}

impl<S> Bindings<S> {
    pub fn new() -> Self { Self::default() }

    /// Read-only binding: the contract can be fetched but not updated.
    pub fn read_only(handle: ContractHandle) -> Self {
        Self { handle: Some(handle), signer: None, account: None }
    }

    pub fn connected(handle: ContractHandle, signer: Rc<S>, account: AccountAddress) -> Self {
        Self { handle: Some(handle), signer: Some(signer), account: Some(account) }
    }

    /// First part of the bundle which is required for a submission but is absent.
    pub fn missing(&self) -> Option<Missing> {
        if self.handle.is_none() {
            Some(Missing::Handle)
        } else if self.signer.is_none() {
            Some(Missing::Signer)
        } else if self.account.is_none() {
            Some(Missing::Account)
        } else {
            None
        }
    }
}

/// Successful completion of a submission.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SubmitOutcome {
    pub receipt: InclusionReceipt,
    /// Outcome of the refetch confirming the update.
    pub refresh: FetchOutcome,
}

struct Inner<Q, S, N> {
    contract: ContractId,
    shape: FieldShape,
    client: Rc<Q>,
    notifier: N,
    state: Rc<RefCell<SyncState>>,
    bindings: RefCell<Bindings<S>>,
}

/// Releases the `Submitting` flag if a submission future is dropped before its outcome is
/// recorded.
struct SubmitGuard(Weak<RefCell<SyncState>>);

impl Drop for SubmitGuard {
    fn drop(&mut self) {
        let Some(state) = self.0.upgrade() else {
            return;
        };
        if let Ok(mut state) = state.try_borrow_mut() {
            state.abandon_submit();
        };
    }
}

struct Submission<S> {
    handle: ContractHandle,
    signer: Rc<S>,
    account: AccountAddress,
    method: &'static str,
    args: Vec<Value>,
    guard: SubmitGuard,
}

impl<Q, S, N> Inner<Q, S, N>
where
    Q: ContractQuery + 'static,
    S: 'static,
    N: Notify + 'static,
{
    fn report(&self, report: Option<Report>) {
        if let Some(report) = report {
            self.notifier.report(report);
        }
    }

    fn fetch(self: &Rc<Self>) -> impl Future<Output = FetchOutcome> + 'static {
        let contract = self.contract;
        let shape = self.shape;
        let client = self.client.clone();
        let session = Rc::downgrade(self);

        let issued = self.state.borrow_mut().begin_fetch();
        let handle = self.bindings.borrow().handle.clone();
        let pending = match (issued, handle) {
            (None, _) => {
                debug!("Ignoring {contract} fetch request on a closed session");
                Err(FetchOutcome::Cancelled)
            }
            (Some(token), None) => {
                debug!("No {contract} contract is bound; fetch {token} has nothing to read");
                self.state.borrow_mut().settle_not_ready(token);
                Err(FetchOutcome::NotReady)
            }
            (Some(token), Some(handle)) => Ok((token, handle)),
        };

        async move {
            let (token, handle) = match pending {
                Ok(pending) => pending,
                Err(outcome) => return outcome,
            };

            debug!("Fetching {contract} state from {handle} (fetch {token})");
            let result = client
                .query(&handle, contract.query_method())
                .await
                .map_err(FetchError::from)
                .and_then(|raw| decode(&raw, &shape).map_err(FetchError::from));

            let Some(inner) = session.upgrade() else {
                debug!("Dropping result of fetch {token}: {contract} session was torn down");
                return FetchOutcome::Cancelled;
            };
            let outcome = inner.state.borrow_mut().apply_fetch(token, result);
            match &outcome {
                FetchOutcome::Loaded(fields) => {
                    debug!("Loaded {} field(s) of {contract} from {handle}", fields.len())
                }
                FetchOutcome::Failed(err) => warn!("Fetching {contract} from {handle} failed: {err}"),
                FetchOutcome::Superseded => debug!("Fetch {token} of {contract} was superseded"),
                FetchOutcome::Cancelled => debug!("Dropping result of fetch {token}: session closed"),
                FetchOutcome::NotReady => {}
            }
            inner.report(fetch_report(contract, &outcome));
            outcome
        }
    }

    fn prepare_submit<M: Mutation + ?Sized>(
        &self,
        request: &M,
    ) -> Result<Submission<S>, SubmitError> {
        if self.state.borrow().is_closed() {
            return Err(PreconditionError::SessionClosed.into());
        }
        if request.contract() != self.contract {
            return Err(ValidationError::ContractMismatch {
                expected: self.contract,
                found: request.contract(),
            }
            .into());
        }
        request.validate()?;

        let (handle, signer, account) = {
            let bindings = self.bindings.borrow();
            (
                bindings
                    .handle
                    .clone()
                    .ok_or(PreconditionError::NotConnected(Missing::Handle))?,
                bindings
                    .signer
                    .clone()
                    .ok_or(PreconditionError::NotConnected(Missing::Signer))?,
                bindings
                    .account
                    .clone()
                    .ok_or(PreconditionError::NotConnected(Missing::Account))?,
            )
        };

        self.state.borrow_mut().begin_submit()?;
        Ok(Submission {
            handle,
            signer,
            account,
            method: request.method(),
            args: request.args(),
            guard: SubmitGuard(Rc::downgrade(&self.state)),
        })
    }
}

/// Keeps the state of one contract in sync with the chain.
///
/// The runtime is bound to a [`ContractId`]; the deployment it talks to, the wallet signer and the
/// account come with [`Bindings`] and may change over the runtime lifetime. All futures returned by
/// the runtime are `'static` and hold only a weak reference to it: once the runtime is closed or
/// dropped their results are discarded.
pub struct SyncRuntime<Q, S, N = LogNotifier>(Rc<Inner<Q, S, N>>);

impl<Q, S, N> Clone for SyncRuntime<Q, S, N> {
    fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<Q, S, N> SyncRuntime<Q, S, N>
where
    Q: ContractQuery + 'static,
    S: 'static,
    N: Notify + 'static,
{
    pub fn new(contract: ContractId, client: Q, notifier: N) -> Self {
        Self(Rc::new(Inner {
            contract,
            shape: contract.field_shape(),
            client: Rc::new(client),
            notifier,
            state: Rc::new(RefCell::new(SyncState::new())),
            bindings: RefCell::new(Bindings::new()),
        }))
    }

    #[inline]
    pub fn contract(&self) -> ContractId { self.0.contract }
    #[inline]
    pub fn client(&self) -> &Q { &self.0.client }
    #[inline]
    pub fn notifier(&self) -> &N { &self.0.notifier }

    pub fn bindings(&self) -> Bindings<S> { self.0.bindings.borrow().clone() }
    pub fn handle(&self) -> Option<ContractHandle> { self.0.bindings.borrow().handle.clone() }

    pub fn read_status(&self) -> ReadStatus { self.0.state.borrow().read_status() }
    pub fn write_status(&self) -> WriteStatus { self.0.state.borrow().write_status() }
    pub fn fields(&self) -> FieldSet { self.0.state.borrow().fields().clone() }
    pub fn is_closed(&self) -> bool { self.0.state.borrow().is_closed() }

    pub fn snapshot(&self) -> SyncSnapshot {
        let state = self.0.state.borrow();
        SyncSnapshot {
            contract: self.0.contract,
            handle: self.handle(),
            read: state.read_status(),
            write: state.write_status(),
            fields: state.fields().clone(),
            loaded_at: state.loaded_at(),
        }
    }

    /// Replaces the capability bundle.
    ///
    /// If the contract handle has changed a fetch is issued and its future returned; it must be
    /// driven by the caller event loop. Changing only the signer or the account issues nothing.
    /// A handle of another contract is never bound: the runtime is left without a handle.
    pub fn bind(
        &self,
        mut bindings: Bindings<S>,
    ) -> Option<impl Future<Output = FetchOutcome> + 'static> {
        let contract = self.0.contract;
        if let Some(handle) = bindings.handle.as_ref().filter(|h| h.contract != contract) {
            warn!("Refusing to bind {contract} runtime to {handle}");
            bindings.handle = None;
        }
        let changed = {
            let mut current = self.0.bindings.borrow_mut();
            let changed = current.handle != bindings.handle;
            *current = bindings;
            changed
        };
        if !changed {
            return None;
        }
        match self.handle() {
            Some(handle) => debug!("{} runtime is bound to {handle}", self.0.contract),
            None => debug!("{} runtime is unbound", self.0.contract),
        }
        Some(self.0.fetch())
    }

    /// Resolves the contract deployment on `network` and binds the runtime to it.
    pub fn connect(
        &self,
        resolver: &impl ResolveContract,
        network: &NetworkId,
        signer: Option<Rc<S>>,
        account: Option<AccountAddress>,
    ) -> Option<impl Future<Output = FetchOutcome> + 'static> {
        let handle = resolver.resolve(self.0.contract, network);
        if handle.is_none() {
            debug!("{} contract is not deployed on {network}", self.0.contract);
        }
        self.bind(Bindings { handle, signer, account })
    }

    /// Reads the contract fields from the bound deployment.
    ///
    /// The fetch is issued before this method returns: the read status turns `Fetching` and all
    /// fetches issued earlier are superseded. Without a bound contract the read status returns to
    /// `Idle` and the future resolves to [`FetchOutcome::NotReady`] without reporting anything.
    pub fn fetch(&self) -> impl Future<Output = FetchOutcome> + 'static { self.0.fetch() }

    /// Signs and submits a mutating call, then refetches the contract fields.
    ///
    /// Validation and precondition checks run before this method returns; their failures are
    /// reported at once and the returned future resolves to the error without any network call.
    /// Otherwise the write status turns `Submitting` until the submission outcome is known or the
    /// future is dropped.
    pub fn submit<M: Mutation + ?Sized>(
        &self,
        request: &M,
    ) -> impl Future<Output = Result<SubmitOutcome, SubmitError>> + 'static
    where
        S: SignAndSubmit,
    {
        let contract = self.0.contract;
        let session = Rc::downgrade(&self.0);

        let pending = self.0.prepare_submit(request);
        if let Err(err) = &pending {
            warn!("Rejected {contract} update: {err}");
            if !self.is_closed() {
                self.0.report(submit_report(contract, Err(err)));
            }
        }

        async move {
            let Submission { handle, signer, account, method, args, guard } = match pending {
                Ok(submission) => submission,
                Err(err) => return Err(err),
            };

            debug!("Submitting {method} to {handle} on behalf of {account}");
            let result = signer.sign_and_submit(&handle, &account, method, args).await;

            let Some(inner) = session.upgrade() else {
                debug!("Dropping outcome of {method} on {handle}: session was torn down");
                return Err(SubmitError::Cancelled);
            };
            if !inner.state.borrow_mut().finish_submit(result.is_ok()) {
                debug!("Dropping outcome of {method} on {handle}: session closed");
                return Err(SubmitError::Cancelled);
            }
            drop(guard);

            let receipt = match result {
                Ok(receipt) => receipt,
                Err(err) => {
                    let err = SubmitError::from(err);
                    warn!("Updating {contract} at {handle} failed: {err}");
                    inner.report(submit_report(contract, Err(&err)));
                    inner.state.borrow_mut().settle_write();
                    return Err(err);
                }
            };

            info!("{contract} at {handle} was updated in transaction {receipt}");
            inner.report(submit_report(contract, Ok(&receipt)));
            inner.notifier.reset_form();
            inner.state.borrow_mut().settle_write();

            let refresh = inner.fetch();
            drop(inner);
            let refresh = refresh.await;
            Ok(SubmitOutcome { receipt, refresh })
        }
    }

    /// Tears the session down. Results of operations in flight are dropped silently; later
    /// fetches resolve to [`FetchOutcome::Cancelled`] and submissions are rejected.
    pub fn close(&self) {
        self.0.state.borrow_mut().close();
        debug!("{} session closed", self.0.contract);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    struct NoSigner;

    #[test]
    fn missing() {
        let handle = ContractHandle::new(ContractId::Tipper, "development", "5Tipper");
        assert_eq!(Bindings::<NoSigner>::new().missing(), Some(Missing::Handle));
        assert_eq!(
            Bindings::<NoSigner>::read_only(handle.clone()).missing(),
            Some(Missing::Signer)
        );

        let mut bindings =
            Bindings::connected(handle, Rc::new(NoSigner), AccountAddress::from("5A"));
        assert_eq!(bindings.missing(), None);
        bindings.account = None;
        assert_eq!(bindings.missing(), Some(Missing::Account));
    }
}
