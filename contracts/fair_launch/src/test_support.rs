extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Events, Ledger},
    token, Address, BytesN, Env, Symbol, TryIntoVal, Val, Vec,
};

use crate::constants::FAIR_LAUNCH_DURATION;
use crate::{FairLaunch, FairLaunchClient};

pub const POOL_ID: [u8; 32] = [0x7au8; 32];

mod accepting {
    use soroban_sdk::{contract, contractimpl, symbol_short, BytesN, Env};

    use super::POOL_ID;
    use crate::PoolParams;

    /// Pool manager that accepts every pool and remembers the parameters.
    #[contract]
    pub struct AcceptingPoolManager;

    #[contractimpl]
    impl AcceptingPoolManager {
        pub fn create_pool(env: Env, params: PoolParams) -> BytesN<32> {
            env.storage().instance().set(&symbol_short!("params"), &params);
            BytesN::from_array(&env, &POOL_ID)
        }

        pub fn last_params(env: Env) -> Option<PoolParams> {
            env.storage().instance().get(&symbol_short!("params"))
        }
    }
}

mod rejecting {
    use soroban_sdk::{contract, contractimpl, BytesN, Env};

    use crate::PoolParams;

    /// Pool manager whose pool creation always aborts.
    #[contract]
    pub struct RejectingPoolManager;

    #[contractimpl]
    impl RejectingPoolManager {
        pub fn create_pool(_env: Env, _params: PoolParams) -> BytesN<32> {
            panic!("pool creation rejected");
        }
    }
}

mod reentering {
    use soroban_sdk::{contract, contractimpl, symbol_short, Address, BytesN, Env};

    use super::POOL_ID;
    use crate::{FairLaunchClient, PoolParams};

    /// Pool manager that calls back into the launch from inside `create_pool`
    /// and records whether the host refused both nested calls.
    #[contract]
    pub struct ReenteringPoolManager;

    #[contractimpl]
    impl ReenteringPoolManager {
        pub fn set_target(env: Env, launch: Address) {
            env.storage().instance().set(&symbol_short!("target"), &launch);
        }

        pub fn create_pool(env: Env, _params: PoolParams) -> BytesN<32> {
            let launch: Address = env
                .storage()
                .instance()
                .get(&symbol_short!("target"))
                .unwrap();
            let client = FairLaunchClient::new(&env, &launch);

            let bootstrap = client.try_bootstrap();
            let claim = client.try_claim_tokens(&env.current_contract_address());
            env.storage()
                .instance()
                .set(
                    &symbol_short!("refused"),
                    &(matches!(bootstrap, Err(Err(_))) && matches!(claim, Err(Err(_)))),
                );

            BytesN::from_array(&env, &POOL_ID)
        }

        pub fn nested_calls_refused(env: Env) -> Option<bool> {
            env.storage().instance().get(&symbol_short!("refused"))
        }
    }
}

pub use accepting::{AcceptingPoolManager, AcceptingPoolManagerClient};
pub use reentering::{ReenteringPoolManager, ReenteringPoolManagerClient};
pub use rejecting::RejectingPoolManager;

/// Which mock answers `create_pool`.
#[derive(Clone, Copy)]
pub enum PoolKind {
    Accepting,
    Rejecting,
    Reentering,
}

pub struct Launch {
    pub env: Env,
    pub client: FairLaunchClient<'static>,
    pub owner: Address,
    pub pool_manager: Address,
    pub vots: token::Client<'static>,
    pub vots_sac: token::StellarAssetClient<'static>,
    pub eth: token::Client<'static>,
    pub eth_sac: token::StellarAssetClient<'static>,
}

impl Launch {
    /// Mint `amount` of the paired asset to `who` and contribute it.
    pub fn fund_and_contribute(&self, who: &Address, amount: i128) {
        self.eth_sac.mint(who, &amount);
        self.client.contribute(who, &amount);
    }

    /// Top up the contract's paired balance outside the ledger.
    pub fn seed_contract(&self, amount: i128) {
        self.eth_sac.mint(&self.client.address, &amount);
    }

    /// Report one full trade through both callbacks.
    pub fn trade(&self, correlation: u8, amount: i128) -> i128 {
        let pool_key = pool_key(&self.env);
        let token = correlation_token(&self.env, correlation);
        self.client.on_trade_before(&pool_key, &amount, &token);
        self.client.on_trade_after(&pool_key, &amount, &token)
    }

    pub fn expire_window(&self) {
        self.env
            .ledger()
            .with_mut(|li| li.timestamp += FAIR_LAUNCH_DURATION);
    }

    /// Payload of the most recent event this contract published under `topic`.
    pub fn last_event(&self, topic: Symbol) -> Option<(Vec<Val>, Val)> {
        let mut found = None;
        for (contract, topics, data) in self.env.events().all().iter() {
            if contract != self.client.address {
                continue;
            }
            let first: Option<Symbol> = topics
                .get(0)
                .and_then(|t| t.try_into_val(&self.env).ok());
            if first == Some(topic.clone()) {
                found = Some((topics, data));
            }
        }
        found
    }
}

pub fn pool_key(env: &Env) -> BytesN<32> {
    BytesN::from_array(env, &[0x01u8; 32])
}

pub fn correlation_token(env: &Env, n: u8) -> BytesN<32> {
    BytesN::from_array(env, &[n; 32])
}

pub fn setup() -> Launch {
    setup_with(PoolKind::Accepting)
}

pub fn setup_with_rejecting_pool() -> Launch {
    setup_with(PoolKind::Rejecting)
}

pub fn setup_with(kind: PoolKind) -> Launch {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(FairLaunch, ());
    let client = FairLaunchClient::new(&env, &contract_id);

    let owner = Address::generate(&env);
    let hook = Address::generate(&env);
    let eth_admin = Address::generate(&env);

    let vots_sac = env.register_stellar_asset_contract_v2(contract_id.clone());
    let eth_sac = env.register_stellar_asset_contract_v2(eth_admin);
    let pool_manager = match kind {
        PoolKind::Accepting => env.register(AcceptingPoolManager, ()),
        PoolKind::Rejecting => env.register(RejectingPoolManager, ()),
        PoolKind::Reentering => {
            let id = env.register(ReenteringPoolManager, ());
            ReenteringPoolManagerClient::new(&env, &id).set_target(&contract_id);
            id
        }
    };

    client.init(
        &owner,
        &vots_sac.address(),
        &eth_sac.address(),
        &pool_manager,
        &hook,
    );

    Launch {
        client,
        owner,
        pool_manager,
        vots: token::Client::new(&env, &vots_sac.address()),
        vots_sac: token::StellarAssetClient::new(&env, &vots_sac.address()),
        eth: token::Client::new(&env, &eth_sac.address()),
        eth_sac: token::StellarAssetClient::new(&env, &eth_sac.address()),
        env,
    }
}
