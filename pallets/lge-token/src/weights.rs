//! Weights for pallet-lge-token.
//!
//! Hand-estimated from storage access counts until the benchmarks in
//! `benchmarking.rs` are run against reference hardware.

#![allow(unused_parens)]
#![allow(unused_imports)]

use core::marker::PhantomData;
use frame_support::{
    traits::Get,
    weights::{constants::RocksDbWeight, Weight},
};

pub trait WeightInfo {
    fn mint() -> Weight;
    fn transfer() -> Weight;
    fn transfer_gated() -> Weight;
    fn approve() -> Weight;
    fn transfer_from() -> Weight;
    fn create_whitelist(r: u32) -> Weight;
    fn modify_whitelist(a: u32) -> Weight;
    fn set_current_round() -> Weight;
    fn transfer_role() -> Weight;
}

/// Weights for pallet-lge-token using the runtime's database weights.
pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: frame_system::Config> WeightInfo for SubstrateWeight<T> {
    // Reads: AccessControl, TotalSupply, Balances
    // Writes: TotalSupply, Balances
    fn mint() -> Weight {
        Weight::from_parts(12_000_000, 3_593)
            .saturating_add(T::DbWeight::get().reads(3))
            .saturating_add(T::DbWeight::get().writes(2))
    }
    // Reads: LgePair, Balances (x2)
    // Writes: Balances (x2)
    fn transfer() -> Weight {
        Weight::from_parts(15_000_000, 6_196)
            .saturating_add(T::DbWeight::get().reads(3))
            .saturating_add(T::DbWeight::get().writes(2))
    }
    // Reads: LgePair, CurrentRound, Rounds, WhitelistEpoch, Memberships, Balances (x2)
    // Writes: Rounds, Memberships, Balances (x2)
    fn transfer_gated() -> Weight {
        Weight::from_parts(24_000_000, 8_130)
            .saturating_add(T::DbWeight::get().reads(7))
            .saturating_add(T::DbWeight::get().writes(4))
    }
    // Writes: Allowances
    fn approve() -> Weight {
        Weight::from_parts(9_000_000, 3_593)
            .saturating_add(T::DbWeight::get().reads(1))
            .saturating_add(T::DbWeight::get().writes(1))
    }
    // Reads: Allowances + gated transfer
    // Writes: Allowances + gated transfer
    fn transfer_from() -> Weight {
        Weight::from_parts(28_000_000, 8_130)
            .saturating_add(T::DbWeight::get().reads(8))
            .saturating_add(T::DbWeight::get().writes(5))
    }
    // Reads: AccessControl, WhitelistEpoch
    // Writes: WhitelistEpoch, Rounds, CurrentRound, LgePair
    fn create_whitelist(r: u32) -> Weight {
        Weight::from_parts(11_000_000, 1_489)
            .saturating_add(Weight::from_parts(450_000, 0).saturating_mul(r.into()))
            .saturating_add(T::DbWeight::get().reads(2))
            .saturating_add(T::DbWeight::get().writes(4))
    }
    // Reads: AccessControl, Rounds, WhitelistEpoch, Memberships (per account)
    // Writes: Rounds, Memberships (per account)
    fn modify_whitelist(a: u32) -> Weight {
        Weight::from_parts(12_000_000, 1_489)
            .saturating_add(Weight::from_parts(3_200_000, 2_603).saturating_mul(a.into()))
            .saturating_add(T::DbWeight::get().reads(3))
            .saturating_add(T::DbWeight::get().reads((1_u64).saturating_mul(a.into())))
            .saturating_add(T::DbWeight::get().writes(1))
            .saturating_add(T::DbWeight::get().writes((1_u64).saturating_mul(a.into())))
    }
    // Reads: AccessControl, Rounds
    // Writes: CurrentRound
    fn set_current_round() -> Weight {
        Weight::from_parts(8_000_000, 1_489)
            .saturating_add(T::DbWeight::get().reads(2))
            .saturating_add(T::DbWeight::get().writes(1))
    }
    // Reads: AccessControl
    // Writes: AccessControl
    fn transfer_role() -> Weight {
        Weight::from_parts(7_000_000, 1_489)
            .saturating_add(T::DbWeight::get().reads(1))
            .saturating_add(T::DbWeight::get().writes(1))
    }
}

// For backwards compatibility and tests.
impl WeightInfo for () {
    fn mint() -> Weight {
        Weight::from_parts(12_000_000, 3_593)
            .saturating_add(RocksDbWeight::get().reads(3))
            .saturating_add(RocksDbWeight::get().writes(2))
    }
    fn transfer() -> Weight {
        Weight::from_parts(15_000_000, 6_196)
            .saturating_add(RocksDbWeight::get().reads(3))
            .saturating_add(RocksDbWeight::get().writes(2))
    }
    fn transfer_gated() -> Weight {
        Weight::from_parts(24_000_000, 8_130)
            .saturating_add(RocksDbWeight::get().reads(7))
            .saturating_add(RocksDbWeight::get().writes(4))
    }
    fn approve() -> Weight {
        Weight::from_parts(9_000_000, 3_593)
            .saturating_add(RocksDbWeight::get().reads(1))
            .saturating_add(RocksDbWeight::get().writes(1))
    }
    fn transfer_from() -> Weight {
        Weight::from_parts(28_000_000, 8_130)
            .saturating_add(RocksDbWeight::get().reads(8))
            .saturating_add(RocksDbWeight::get().writes(5))
    }
    fn create_whitelist(r: u32) -> Weight {
        Weight::from_parts(11_000_000, 1_489)
            .saturating_add(Weight::from_parts(450_000, 0).saturating_mul(r.into()))
            .saturating_add(RocksDbWeight::get().reads(2))
            .saturating_add(RocksDbWeight::get().writes(4))
    }
    fn modify_whitelist(a: u32) -> Weight {
        Weight::from_parts(12_000_000, 1_489)
            .saturating_add(Weight::from_parts(3_200_000, 2_603).saturating_mul(a.into()))
            .saturating_add(RocksDbWeight::get().reads(3))
            .saturating_add(RocksDbWeight::get().reads((1_u64).saturating_mul(a.into())))
            .saturating_add(RocksDbWeight::get().writes(1))
            .saturating_add(RocksDbWeight::get().writes((1_u64).saturating_mul(a.into())))
    }
    fn set_current_round() -> Weight {
        Weight::from_parts(8_000_000, 1_489)
            .saturating_add(RocksDbWeight::get().reads(2))
            .saturating_add(RocksDbWeight::get().writes(1))
    }
    fn transfer_role() -> Weight {
        Weight::from_parts(7_000_000, 1_489)
            .saturating_add(RocksDbWeight::get().reads(1))
            .saturating_add(RocksDbWeight::get().writes(1))
    }
}
