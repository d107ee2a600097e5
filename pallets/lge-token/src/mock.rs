use crate as pallet_lge_token;
use core::{cell::Cell, time::Duration};
use frame_support::{
    derive_impl, parameter_types,
    traits::{ConstU32, UnixTime},
};
use sp_runtime::{traits::IdentityLookup, BuildStorage};

type Block = frame_system::mocking::MockBlock<Test>;

// Configure a mock runtime to test the pallet.
frame_support::construct_runtime!(
    pub enum Test {
        System: frame_system,
        LgeToken: pallet_lge_token,
    }
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
    type AccountId = u64;
    type Lookup = IdentityLookup<Self::AccountId>;
    type Block = Block;
}

pub const OWNER: u64 = 1;
pub const ALICE: u64 = 2;
pub const BOB: u64 = 3;
pub const CHARLIE: u64 = 4;
pub const PAIR: u64 = 10;

/// Unix time the mock clock starts at.
pub const GENESIS_TIME: u64 = 1_700_000_000;

pub const OWNER_BALANCE: u128 = 10_800_000;
pub const PAIR_BALANCE: u128 = 200_000;

parameter_types! {
    pub const SupplyCap: u128 = 1_000_000_000;
}

thread_local! {
    static NOW: Cell<u64> = const { Cell::new(GENESIS_TIME) };
}

/// Clock the tests move by hand.
pub struct MockTime;

impl UnixTime for MockTime {
    fn now() -> Duration {
        Duration::from_secs(NOW.with(|now| now.get()))
    }
}

pub fn now() -> u64 {
    NOW.with(|now| now.get())
}

pub fn advance_time(secs: u64) {
    NOW.with(|now| now.set(now.get() + secs));
}

impl pallet_lge_token::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type TimeProvider = MockTime;
    type SupplyCap = SupplyCap;
    type MaxRounds = ConstU32<8>;
    type MaxWhitelistBatch = ConstU32<16>;
    type WeightInfo = ();
}

// Build genesis storage according to the mock runtime.
pub fn new_test_ext() -> sp_io::TestExternalities {
    NOW.with(|now| now.set(GENESIS_TIME));

    let mut t = frame_system::GenesisConfig::<Test>::default().build_storage().unwrap();

    pallet_lge_token::GenesisConfig::<Test> {
        owner: Some(OWNER),
        whitelister: Some(OWNER),
        token_name: b"SWAPZ.app".to_vec(),
        token_symbol: b"SWAPZ".to_vec(),
        decimals: 18,
        initial_balances: vec![(OWNER, OWNER_BALANCE), (PAIR, PAIR_BALANCE)],
    }
    .assimilate_storage(&mut t)
    .unwrap();

    let mut ext = sp_io::TestExternalities::new(t);
    // Events are only deposited from block 1 onwards.
    ext.execute_with(|| System::set_block_number(1));
    ext
}

/// Genesis plus the two-round whitelist used throughout the tests:
/// round 0 is 1200s capped at 1000, round 1 is 600s capped at 5000,
/// ALICE is whitelisted for round 0 only.
pub fn new_lge_ext() -> sp_io::TestExternalities {
    let mut ext = new_test_ext();
    ext.execute_with(|| {
        LgeToken::create_whitelist(
            RuntimeOrigin::signed(OWNER),
            PAIR,
            vec![1200, 600],
            vec![1_000, 5_000],
        )
        .unwrap();
        LgeToken::modify_whitelist(RuntimeOrigin::signed(OWNER), 0, 1200, 1_000, vec![ALICE], true)
            .unwrap();
    });
    ext
}
