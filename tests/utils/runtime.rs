use std::rc::Rc;
use std::sync::Once;

use futures::executor::block_on;
use tipper::{AccountAddress, Bindings, ContractId, FetchOutcome, SyncRuntime};

use super::chain::{StubChain, StubSigner};
use super::report::RecordingNotifier;
use super::{handle, ALICE, GREETER, TIPPER};

static INIT: Once = Once::new();

pub type TestRuntime = SyncRuntime<Rc<StubChain>, StubSigner, Rc<RecordingNotifier>>;

pub fn initialize() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Runtime wired to stub chain, signer and notifier which stay accessible to the test.
pub struct Harness {
    pub runtime: TestRuntime,
    pub chain: Rc<StubChain>,
    pub signer: Rc<StubSigner>,
    pub notifier: Rc<RecordingNotifier>,
}

impl Harness {
    pub fn new(contract: ContractId) -> Self {
        initialize();
        let chain = Rc::new(StubChain::new());
        let signer = Rc::new(StubSigner::accepting());
        let notifier = Rc::new(RecordingNotifier::default());
        let runtime = SyncRuntime::new(contract, chain.clone(), notifier.clone());
        Self { runtime, chain, signer, notifier }
    }

    pub fn tipper() -> Self { Self::new(ContractId::Tipper) }

    pub fn greeter() -> Self { Self::new(ContractId::Greeter) }

    pub fn address(&self) -> &'static str {
        match self.runtime.contract() {
            ContractId::Greeter => GREETER,
            ContractId::Tipper => TIPPER,
        }
    }

    pub fn bindings(&self) -> Bindings<StubSigner> {
        Bindings::connected(
            handle(self.runtime.contract(), self.address()),
            self.signer.clone(),
            AccountAddress::from(ALICE),
        )
    }

    /// Binds the runtime to the deployment with a connected wallet and drives the initial fetch.
    pub fn connect(&self) -> FetchOutcome {
        let fetch = self
            .runtime
            .bind(self.bindings())
            .expect("binding a new handle must issue a fetch");
        block_on(fetch)
    }
}
