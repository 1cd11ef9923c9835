#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::StellarAssetClient,
    Address, Env,
};
use staking::{StakingContract, StakingContractClient};
use treasury::TreasuryContract;
use vault::RewardVaultContract;

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Stake { amount: u64 },
    Withdraw { index: u8 },
    Claim,
    Advance { seconds: u32 },
    SetRate { rate: u16 },
    Sweep { amount: u64 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1_700_000_000);

    let admin = Address::generate(&env);

    let stake_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let ledger_id = env.register(StakingContract, ());
    let client = StakingContractClient::new(&env, &ledger_id);

    let vault_id = env.register(RewardVaultContract, ());
    vault::RewardVaultContractClient::new(&env, &vault_id)
        .initialize(&admin, &reward_token, &ledger_id);
    StellarAssetClient::new(&env, &reward_token).mint(&vault_id, &i128::from(u64::MAX));

    let treasury_id = env.register(TreasuryContract, ());
    treasury::TreasuryContractClient::new(&env, &treasury_id).initialize(&admin);

    client.initialize(&admin, &stake_token, &vault_id, &treasury_id, &10, &2);

    let mut users = vec![admin.clone()];
    for _ in 0..3 {
        let user = Address::generate(&env);
        StellarAssetClient::new(&env, &stake_token).mint(&user, &i128::from(u64::MAX));
        users.push(user);
    }

    // Call entry points with arbitrary parameters looking for unhandled
    // panics (index handling, missing overflow protection). All failures
    // must surface as typed errors through try_, never as panics.
    for (i, action) in actions.into_iter().enumerate() {
        let caller = &users[i % users.len()];
        match action {
            FuzzAction::Stake { amount } => {
                let _ = client.try_stake(caller, &i128::from(amount));
            }
            FuzzAction::Withdraw { index } => {
                let _ = client.try_withdraw_stake(caller, &u32::from(index));
            }
            FuzzAction::Claim => {
                let _ = client.try_claim_reward(caller);
            }
            FuzzAction::Advance { seconds } => {
                let now = env.ledger().timestamp();
                env.ledger().set_timestamp(now.saturating_add(u64::from(seconds)));
            }
            FuzzAction::SetRate { rate } => {
                let _ = client.try_set_rate(&admin, &u32::from(rate));
            }
            FuzzAction::Sweep { amount } => {
                let _ = client.try_emergency_sweep(&admin, &i128::from(amount));
            }
        }
    }
});
