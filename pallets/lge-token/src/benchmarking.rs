//! Benchmarking setup for pallet-lge-token

use super::*;

#[allow(unused)]
use crate::Pallet as LgeToken;
use frame_benchmarking::v2::*;
use frame_system::RawOrigin;
use sp_std::{vec, vec::Vec};

fn admin<T: Config>() -> T::AccountId {
    let admin: T::AccountId = whitelisted_caller();
    AccessControl::<T>::put(Roles::new(Some(admin.clone()), Some(admin.clone())));
    admin
}

/// Configures `rounds` one-hour rounds gated on the returned pair account.
fn lge<T: Config>(rounds: u32) -> (T::AccountId, T::AccountId) {
    let admin = admin::<T>();
    let pair: T::AccountId = account("pair", 0, 0);
    let durations = vec![3_600u64; rounds as usize];
    let caps = vec![1_000_000u128; rounds as usize];
    Pallet::<T>::create_whitelist(RawOrigin::Signed(admin.clone()).into(), pair.clone(), durations, caps)
        .expect("whitelist config is valid");
    (admin, pair)
}

#[benchmarks]
mod benchmarks {
    use super::*;

    #[benchmark]
    fn mint() {
        let caller = admin::<T>();
        let recipient: T::AccountId = account("recipient", 0, 0);
        let amount: u128 = 1_000_000;

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), recipient.clone(), amount);

        assert_eq!(Balances::<T>::get(&recipient), amount);
    }

    #[benchmark]
    fn transfer() {
        let caller: T::AccountId = account("sender", 0, 0);
        let recipient: T::AccountId = account("recipient", 0, 0);
        let amount: u128 = 1_000_000;
        Balances::<T>::insert(&caller, 10_000_000);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), recipient.clone(), amount);

        assert_eq!(Balances::<T>::get(&recipient), amount);
    }

    /// Worst case: a first buy that starts the round and records quota.
    #[benchmark]
    fn transfer_gated() {
        let (admin, pair) = lge::<T>(T::MaxRounds::get());
        let buyer: T::AccountId = account("buyer", 0, 0);
        Pallet::<T>::modify_whitelist(
            RawOrigin::Signed(admin).into(),
            0,
            3_600,
            1_000_000,
            vec![buyer.clone()],
            true,
        )
        .expect("round 0 exists");
        Balances::<T>::insert(&pair, 10_000_000);

        #[block]
        {
            Pallet::<T>::do_transfer(&pair, &buyer, 1_000).expect("buyer is whitelisted");
        }

        assert_eq!(Pallet::<T>::purchased_in_current_round(&buyer), 1_000);
        assert!(Rounds::<T>::get()[0].start_time.is_some());
    }

    #[benchmark]
    fn approve() {
        let caller: T::AccountId = whitelisted_caller();
        let spender: T::AccountId = account("spender", 0, 0);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), spender.clone(), 1_000);

        assert_eq!(Allowances::<T>::get(&caller, &spender), 1_000);
    }

    #[benchmark]
    fn transfer_from() {
        let (admin, pair) = lge::<T>(1);
        let spender: T::AccountId = whitelisted_caller();
        let buyer: T::AccountId = account("buyer", 0, 0);
        Pallet::<T>::modify_whitelist(
            RawOrigin::Signed(admin).into(),
            0,
            3_600,
            1_000_000,
            vec![buyer.clone()],
            true,
        )
        .expect("round 0 exists");
        Balances::<T>::insert(&pair, 10_000_000);
        Allowances::<T>::insert(&pair, &spender, 10_000);

        #[extrinsic_call]
        _(RawOrigin::Signed(spender), pair, buyer.clone(), 1_000);

        assert_eq!(Balances::<T>::get(&buyer), 1_000);
    }

    #[benchmark]
    fn create_whitelist(r: Linear<0, { T::MaxRounds::get() }>) {
        let caller = admin::<T>();
        let pair: T::AccountId = account("pair", 0, 0);
        let durations = vec![3_600u64; r as usize];
        let caps = vec![1_000_000u128; r as usize];

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), pair.clone(), durations, caps);

        assert_eq!(LgePair::<T>::get(), Some(pair));
        assert_eq!(Rounds::<T>::get().len(), r as usize);
    }

    #[benchmark]
    fn modify_whitelist(a: Linear<0, { T::MaxWhitelistBatch::get() }>) {
        let (admin, _) = lge::<T>(1);
        let accounts: Vec<T::AccountId> = (0..a).map(|i| account("member", i, 0)).collect();

        #[extrinsic_call]
        _(RawOrigin::Signed(admin), 0, 7_200, 2_000_000, accounts.clone(), true);

        assert!(accounts.iter().all(Pallet::<T>::is_whitelisted_in_current_round));
    }

    #[benchmark]
    fn set_current_round() {
        let (admin, _) = lge::<T>(2);

        #[extrinsic_call]
        _(RawOrigin::Signed(admin), 1);

        assert_eq!(CurrentRound::<T>::get(), 1);
    }

    #[benchmark]
    fn transfer_role() {
        let caller = admin::<T>();
        let successor: T::AccountId = account("successor", 0, 0);

        #[block]
        {
            Pallet::<T>::transfer_whitelister(
                RawOrigin::Signed(caller).into(),
                successor.clone(),
            )
            .expect("caller holds the role");
        }

        assert_eq!(Pallet::<T>::current_whitelister(), Some(successor));
    }

    impl_benchmark_test_suite!(LgeToken, crate::mock::new_test_ext(), crate::mock::Test);
}
