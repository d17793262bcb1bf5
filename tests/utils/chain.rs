use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};

use futures::channel::oneshot;
use serde_json::Value;
use tipper::{
    AccountAddress, CallOutcome, ChainError, ContractAddress, ContractHandle, ContractQuery,
    InclusionReceipt, SignAndSubmit,
};

pub type QueryResult = Result<CallOutcome, ChainError>;
pub type SubmitResult = Result<InclusionReceipt, ChainError>;

/// Chain client answering queries from a per-address script.
///
/// A deferred answer suspends the query until the test sends it through the returned channel;
/// otherwise the current response of the address is returned at once.
#[derive(Default)]
pub struct StubChain {
    responses: RefCell<HashMap<ContractAddress, QueryResult>>,
    deferred: RefCell<HashMap<ContractAddress, VecDeque<oneshot::Receiver<QueryResult>>>>,
    queries: RefCell<Vec<(ContractHandle, &'static str)>>,
}

impl StubChain {
    pub fn new() -> Self { Self::default() }

    pub fn respond(&self, address: &str, response: QueryResult) {
        self.responses
            .borrow_mut()
            .insert(ContractAddress::from(address), response);
    }

    pub fn defer(&self, address: &str) -> oneshot::Sender<QueryResult> {
        let (tx, rx) = oneshot::channel();
        self.deferred
            .borrow_mut()
            .entry(ContractAddress::from(address))
            .or_default()
            .push_back(rx);
        tx
    }

    pub fn calls(&self) -> usize { self.queries.borrow().len() }

    pub fn queries(&self) -> Vec<(ContractHandle, &'static str)> { self.queries.borrow().clone() }
}

impl ContractQuery for StubChain {
    async fn query(
        &self,
        handle: &ContractHandle,
        method: &'static str,
    ) -> Result<CallOutcome, ChainError> {
        self.queries.borrow_mut().push((handle.clone(), method));
        let deferred = self
            .deferred
            .borrow_mut()
            .get_mut(&handle.address)
            .and_then(VecDeque::pop_front);
        match deferred {
            Some(rx) => rx.await.unwrap_or(Err(ChainError::Connectivity)),
            None => self
                .responses
                .borrow()
                .get(&handle.address)
                .cloned()
                .unwrap_or(Err(ChainError::Connectivity)),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SignedCall {
    pub handle: ContractHandle,
    pub account: AccountAddress,
    pub method: &'static str,
    pub args: Vec<Value>,
}

/// Wallet signer recording every call it is asked to sign.
pub struct StubSigner {
    response: RefCell<SubmitResult>,
    deferred: RefCell<VecDeque<oneshot::Receiver<SubmitResult>>>,
    calls: RefCell<Vec<SignedCall>>,
    tx_no: Cell<u32>,
}

impl Default for StubSigner {
    fn default() -> Self {
        Self {
            response: RefCell::new(Err(ChainError::Connectivity)),
            deferred: none(),
            calls: none(),
            tx_no: Cell::new(0),
        }
    }
}

fn none<T: Default>() -> RefCell<T> { RefCell::new(T::default()) }

impl StubSigner {
    /// Signer including every transaction with a fresh transaction hash.
    pub fn accepting() -> Self {
        let signer = Self::default();
        *signer.response.borrow_mut() = Ok(InclusionReceipt::new("", None));
        signer
    }

    pub fn respond(&self, response: SubmitResult) { *self.response.borrow_mut() = response; }

    pub fn defer(&self) -> oneshot::Sender<SubmitResult> {
        let (tx, rx) = oneshot::channel();
        self.deferred.borrow_mut().push_back(rx);
        tx
    }

    pub fn calls(&self) -> Vec<SignedCall> { self.calls.borrow().clone() }
}

impl SignAndSubmit for StubSigner {
    async fn sign_and_submit(
        &self,
        handle: &ContractHandle,
        account: &AccountAddress,
        method: &'static str,
        args: Vec<Value>,
    ) -> Result<InclusionReceipt, ChainError> {
        self.calls.borrow_mut().push(SignedCall {
            handle: handle.clone(),
            account: account.clone(),
            method,
            args,
        });
        let deferred = self.deferred.borrow_mut().pop_front();
        if let Some(rx) = deferred {
            return rx.await.unwrap_or(Err(ChainError::Timeout));
        }
        let response = self.response.borrow().clone();
        response.map(|receipt| {
            if !receipt.tx_hash.is_empty() {
                return receipt;
            }
            self.tx_no.set(self.tx_no.get() + 1);
            InclusionReceipt::new(format!("0x{:064x}", self.tx_no.get()), Some(1024))
        })
    }
}
