#![cfg_attr(not(feature = "std"), no_std)]
// `pallet::getter` and `RuntimeEvent` in Config are deprecated upstream but still supported
#![allow(deprecated)]
#![allow(clippy::let_unit_value)]

//! # LGE Token Pallet
//!
//! A fungible token whose launch phase is protected by a Liquidity Generation
//! Event (LGE) whitelist. Every movement out of the configured pair account is
//! a "gated buy": while the current whitelist round is running, only accounts
//! whitelisted for that round may receive, and only up to the round's
//! per-account cap.
//!
//! Rounds start lazily on their first gated buy and never advance on their own;
//! the whitelister moves the pointer with `set_current_round`. Once the current
//! round has expired, transfers from the pair are unrestricted.
//!
//! Two independent principals guard the admin surface: the owner (minting) and
//! the whitelister (round configuration). Either can hand over or renounce its
//! role without touching the other.

use frame_support::{dispatch::DispatchResult, ensure, pallet_prelude::*, traits::UnixTime};
use frame_system::{ensure_signed, pallet_prelude::*};
use sp_runtime::traits::TrailingZeroInput;
use sp_std::prelude::*;

pub use pallet::*;

pub mod gate;
pub mod roles;
pub mod rounds;
pub mod weights;

pub use gate::{Denial, Verdict};
pub use roles::{RoleError, Roles};
pub use rounds::{Membership, Round, RoundIndex, RoundReport};
pub use weights::WeightInfo;

#[cfg(test)]
mod mock;


#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

/// The current storage version.
const STORAGE_VERSION: StorageVersion = StorageVersion::new(1);

pub const LOG_TARGET: &str = "pallet-lge-token";

#[frame_support::pallet]
pub mod pallet {
    use super::*;

    #[pallet::config]
    pub trait Config: frame_system::Config {
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

        /// Block time source; the gate works in whole seconds.
        type TimeProvider: UnixTime;

        /// Hard cap on total supply.
        #[pallet::constant]
        type SupplyCap: Get<u128>;

        #[pallet::constant]
        type MaxRounds: Get<u32>;

        /// Largest account list accepted by one `modify_whitelist` call.
        #[pallet::constant]
        type MaxWhitelistBatch: Get<u32>;

        type WeightInfo: WeightInfo;
    }

    #[pallet::pallet]
    #[pallet::storage_version(STORAGE_VERSION)]
    pub struct Pallet<T>(_);

    /// Token name (e.g., "SWAPZ.app")
    #[pallet::storage]
    #[pallet::getter(fn token_name)]
    pub type TokenName<T> = StorageValue<_, BoundedVec<u8, ConstU32<64>>, ValueQuery>;

    /// Token symbol (e.g., "SWAPZ")
    #[pallet::storage]
    #[pallet::getter(fn token_symbol)]
    pub type TokenSymbol<T> = StorageValue<_, BoundedVec<u8, ConstU32<16>>, ValueQuery>;

    #[pallet::storage]
    #[pallet::getter(fn decimals)]
    pub type Decimals<T> = StorageValue<_, u8, ValueQuery>;

    #[pallet::storage]
    #[pallet::getter(fn total_supply)]
    pub type TotalSupply<T> = StorageValue<_, u128, ValueQuery>;

    #[pallet::storage]
    #[pallet::getter(fn balance_of)]
    pub type Balances<T: Config> = StorageMap<_, Blake2_128Concat, T::AccountId, u128, ValueQuery>;

    /// Spending allowances, keyed by (holder, spender).
    #[pallet::storage]
    #[pallet::getter(fn allowance)]
    pub type Allowances<T: Config> = StorageDoubleMap<
        _,
        Blake2_128Concat,
        T::AccountId,
        Blake2_128Concat,
        T::AccountId,
        u128,
        ValueQuery,
    >;

    /// Owner and whitelister principals.
    #[pallet::storage]
    pub type AccessControl<T: Config> = StorageValue<_, Roles<T::AccountId>, ValueQuery>;

    /// The pair account whose outbound transfers are gated.
    #[pallet::storage]
    #[pallet::getter(fn lge_pair)]
    pub type LgePair<T: Config> = StorageValue<_, T::AccountId, OptionQuery>;

    #[pallet::storage]
    pub type Rounds<T: Config> = StorageValue<_, BoundedVec<Round, T::MaxRounds>, ValueQuery>;

    #[pallet::storage]
    #[pallet::getter(fn current_round_index)]
    pub type CurrentRound<T> = StorageValue<_, RoundIndex, ValueQuery>;

    /// Bumped by every `create_whitelist`. Memberships of older epochs stay in
    /// storage but are never consulted again.
    #[pallet::storage]
    pub type WhitelistEpoch<T> = StorageValue<_, u32, ValueQuery>;

    /// Per-round membership and purchased amount, keyed by (epoch, round, account).
    #[pallet::storage]
    pub type Memberships<T: Config> = StorageNMap<
        _,
        (
            NMapKey<Twox64Concat, u32>,
            NMapKey<Twox64Concat, RoundIndex>,
            NMapKey<Blake2_128Concat, T::AccountId>,
        ),
        Membership,
        ValueQuery,
    >;

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        /// Tokens transferred from one account to another
        Transferred { from: T::AccountId, to: T::AccountId, amount: u128 },
        /// New tokens minted
        Minted { to: T::AccountId, amount: u128 },
        /// Spending allowance set
        Approval { owner: T::AccountId, spender: T::AccountId, amount: u128 },
        /// Round sequence replaced; memberships start over
        WhitelistCreated { pair: T::AccountId, rounds: u32, epoch: u32 },
        /// Round parameters overwritten and `accounts` memberships toggled
        WhitelistModified {
            round: RoundIndex,
            duration: u64,
            max_amount: u128,
            accounts: u32,
            whitelisted: bool,
        },
        CurrentRoundSet { round: RoundIndex },
        /// First gated buy started the round clock
        WhitelistRoundStarted { round: RoundIndex, start_time: u64 },
        /// Gated buy consumed part of the buyer's round quota
        WhitelistPurchase { round: RoundIndex, buyer: T::AccountId, amount: u128, bought: u128 },
        /// `None` on either side marks a renounced owner
        OwnershipTransferred { previous: Option<T::AccountId>, new: Option<T::AccountId> },
        /// `None` on either side marks a renounced whitelister
        WhitelisterTransferred { previous: Option<T::AccountId>, new: Option<T::AccountId> },
    }

    #[pallet::error]
    pub enum Error<T> {
        InsufficientBalance,
        InsufficientAllowance,
        /// Decreased allowance below zero
        AllowanceBelowZero,
        /// Minting would push total supply over the cap
        CapExceeded,
        Overflow,
        /// Caller is not the owner
        NotOwner,
        /// Caller is not the whitelister
        NotWhitelister,
        /// New owner or whitelister is the zero address
        ZeroAddressNotAllowed,
        /// Durations and caps differ in length
        InvalidWhitelistConfig,
        TooManyRounds,
        TooManyAddresses,
        RoundNotFound,
        /// Buyer is not whitelisted for the running round
        NotWhitelisted,
        /// Buyer's cumulative purchase would exceed the round cap
        ExceedsWhitelistMax,
    }

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        #[pallet::call_index(0)]
        #[pallet::weight(T::WeightInfo::mint())]
        pub fn mint(origin: OriginFor<T>, to: T::AccountId, amount: u128) -> DispatchResult {
            let who = ensure_signed(origin)?;
            AccessControl::<T>::get().ensure_owner(&who).map_err(Error::<T>::from)?;

            let supply = TotalSupply::<T>::get().checked_add(amount).ok_or(Error::<T>::Overflow)?;
            ensure!(supply <= T::SupplyCap::get(), Error::<T>::CapExceeded);
            let balance = Balances::<T>::get(&to).checked_add(amount).ok_or(Error::<T>::Overflow)?;

            TotalSupply::<T>::put(supply);
            Balances::<T>::insert(&to, balance);
            Self::deposit_event(Event::Minted { to, amount });
            Ok(())
        }

        /// Charged as a gated buy up front. Transfers not sent by the pair
        /// never reach the round reads and are refunded to a plain transfer.
        #[pallet::call_index(1)]
        #[pallet::weight(T::WeightInfo::transfer_gated())]
        pub fn transfer(
            origin: OriginFor<T>,
            to: T::AccountId,
            amount: u128,
        ) -> DispatchResultWithPostInfo {
            let sender = ensure_signed(origin)?;
            let verdict = Self::gated_transfer(&sender, &to, amount)?;
            let actual_weight = match verdict {
                Verdict::Unrestricted if LgePair::<T>::get().as_ref() != Some(&sender) => {
                    Some(T::WeightInfo::transfer())
                },
                _ => None,
            };
            Ok(actual_weight.into())
        }

        #[pallet::call_index(2)]
        #[pallet::weight(T::WeightInfo::approve())]
        pub fn approve(origin: OriginFor<T>, spender: T::AccountId, amount: u128) -> DispatchResult {
            let owner = ensure_signed(origin)?;
            Self::set_allowance(&owner, &spender, amount);
            Ok(())
        }

        #[pallet::call_index(3)]
        #[pallet::weight(T::WeightInfo::approve())]
        pub fn increase_allowance(
            origin: OriginFor<T>,
            spender: T::AccountId,
            added: u128,
        ) -> DispatchResult {
            let owner = ensure_signed(origin)?;
            let amount = Allowances::<T>::get(&owner, &spender)
                .checked_add(added)
                .ok_or(Error::<T>::Overflow)?;
            Self::set_allowance(&owner, &spender, amount);
            Ok(())
        }

        #[pallet::call_index(4)]
        #[pallet::weight(T::WeightInfo::approve())]
        pub fn decrease_allowance(
            origin: OriginFor<T>,
            spender: T::AccountId,
            subtracted: u128,
        ) -> DispatchResult {
            let owner = ensure_signed(origin)?;
            let amount = Allowances::<T>::get(&owner, &spender)
                .checked_sub(subtracted)
                .ok_or(Error::<T>::AllowanceBelowZero)?;
            Self::set_allowance(&owner, &spender, amount);
            Ok(())
        }

        /// Moves `amount` from `owner` to `to` on the caller's allowance. The gate
        /// applies to `owner` exactly as for a direct transfer.
        #[pallet::call_index(5)]
        #[pallet::weight(T::WeightInfo::transfer_from())]
        pub fn transfer_from(
            origin: OriginFor<T>,
            owner: T::AccountId,
            to: T::AccountId,
            amount: u128,
        ) -> DispatchResult {
            let spender = ensure_signed(origin)?;
            let remaining = Allowances::<T>::get(&owner, &spender)
                .checked_sub(amount)
                .ok_or(Error::<T>::InsufficientAllowance)?;
            Self::do_transfer(&owner, &to, amount)?;
            Self::set_allowance(&owner, &spender, remaining);
            Ok(())
        }

        /// Replaces the whole round sequence and designates `pair` as the gated
        /// source. Every round starts unstarted and the pointer returns to 0.
        #[pallet::call_index(6)]
        #[pallet::weight(T::WeightInfo::create_whitelist(durations.len() as u32))]
        pub fn create_whitelist(
            origin: OriginFor<T>,
            pair: T::AccountId,
            durations: Vec<u64>,
            max_amounts: Vec<u128>,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            AccessControl::<T>::get().ensure_whitelister(&who).map_err(Error::<T>::from)?;

            let rounds: BoundedVec<Round, T::MaxRounds> = rounds::configure(&durations, &max_amounts)
                .map_err(Error::<T>::from)?
                .try_into()
                .map_err(|_| Error::<T>::TooManyRounds)?;
            let epoch = WhitelistEpoch::<T>::get().checked_add(1).ok_or(Error::<T>::Overflow)?;
            let count = rounds.len() as u32;

            WhitelistEpoch::<T>::put(epoch);
            Rounds::<T>::put(rounds);
            CurrentRound::<T>::put(0);
            LgePair::<T>::put(&pair);

            log::info!(
                target: LOG_TARGET,
                "LGE whitelist created with {count} round(s), epoch {epoch}"
            );
            Self::deposit_event(Event::WhitelistCreated { pair, rounds: count, epoch });
            Ok(())
        }

        /// Overwrites duration and cap of `round` and sets the membership flag of
        /// every listed account. Purchased amounts and a running clock are kept.
        #[pallet::call_index(7)]
        #[pallet::weight(T::WeightInfo::modify_whitelist(accounts.len() as u32))]
        pub fn modify_whitelist(
            origin: OriginFor<T>,
            round: RoundIndex,
            duration: u64,
            max_amount: u128,
            accounts: Vec<T::AccountId>,
            whitelisted: bool,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            AccessControl::<T>::get().ensure_whitelister(&who).map_err(Error::<T>::from)?;
            ensure!(
                accounts.len() <= T::MaxWhitelistBatch::get() as usize,
                Error::<T>::TooManyAddresses
            );

            Rounds::<T>::try_mutate(|rounds| -> DispatchResult {
                let entry = rounds.get_mut(round as usize).ok_or(Error::<T>::RoundNotFound)?;
                entry.reconfigure(duration, max_amount);
                Ok(())
            })?;

            let epoch = WhitelistEpoch::<T>::get();
            for account in &accounts {
                Memberships::<T>::mutate((epoch, round, account), |membership| {
                    membership.whitelisted = whitelisted
                });
            }

            Self::deposit_event(Event::WhitelistModified {
                round,
                duration,
                max_amount,
                accounts: accounts.len() as u32,
                whitelisted,
            });
            Ok(())
        }

        /// Points the gate at another configured round.
        #[pallet::call_index(8)]
        #[pallet::weight(T::WeightInfo::set_current_round())]
        pub fn set_current_round(origin: OriginFor<T>, round: RoundIndex) -> DispatchResult {
            let who = ensure_signed(origin)?;
            AccessControl::<T>::get().ensure_whitelister(&who).map_err(Error::<T>::from)?;
            ensure!(
                (round as usize) < Rounds::<T>::decode_len().unwrap_or(0),
                Error::<T>::RoundNotFound
            );

            CurrentRound::<T>::put(round);
            log::info!(target: LOG_TARGET, "LGE whitelist pointer moved to round {round}");
            Self::deposit_event(Event::CurrentRoundSet { round });
            Ok(())
        }

        #[pallet::call_index(9)]
        #[pallet::weight(T::WeightInfo::transfer_role())]
        pub fn transfer_whitelister(
            origin: OriginFor<T>,
            new_whitelister: T::AccountId,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            let zero = Self::zero_account();
            let previous = AccessControl::<T>::try_mutate(|roles| {
                roles.transfer_whitelister(&who, new_whitelister.clone(), &zero)
            })
            .map_err(Error::<T>::from)?;

            log::info!(target: LOG_TARGET, "Whitelister role handed over");
            Self::deposit_event(Event::WhitelisterTransferred {
                previous: Some(previous),
                new: Some(new_whitelister),
            });
            Ok(())
        }

        /// Gives up the whitelister role for good. Round configuration becomes
        /// impossible afterwards.
        #[pallet::call_index(10)]
        #[pallet::weight(T::WeightInfo::transfer_role())]
        pub fn renounce_whitelister(origin: OriginFor<T>) -> DispatchResult {
            let who = ensure_signed(origin)?;
            let previous = AccessControl::<T>::try_mutate(|roles| roles.renounce_whitelister(&who))
                .map_err(Error::<T>::from)?;

            log::info!(target: LOG_TARGET, "Whitelister role renounced");
            Self::deposit_event(Event::WhitelisterTransferred { previous: Some(previous), new: None });
            Ok(())
        }

        #[pallet::call_index(11)]
        #[pallet::weight(T::WeightInfo::transfer_role())]
        pub fn transfer_ownership(origin: OriginFor<T>, new_owner: T::AccountId) -> DispatchResult {
            let who = ensure_signed(origin)?;
            let zero = Self::zero_account();
            let previous = AccessControl::<T>::try_mutate(|roles| {
                roles.transfer_ownership(&who, new_owner.clone(), &zero)
            })
            .map_err(Error::<T>::from)?;

            log::info!(target: LOG_TARGET, "Ownership handed over");
            Self::deposit_event(Event::OwnershipTransferred {
                previous: Some(previous),
                new: Some(new_owner),
            });
            Ok(())
        }

        #[pallet::call_index(12)]
        #[pallet::weight(T::WeightInfo::transfer_role())]
        pub fn renounce_ownership(origin: OriginFor<T>) -> DispatchResult {
            let who = ensure_signed(origin)?;
            let previous = AccessControl::<T>::try_mutate(|roles| roles.renounce_ownership(&who))
                .map_err(Error::<T>::from)?;

            log::info!(target: LOG_TARGET, "Ownership renounced");
            Self::deposit_event(Event::OwnershipTransferred { previous: Some(previous), new: None });
            Ok(())
        }
    }

    #[pallet::genesis_config]
    #[derive(frame_support::DefaultNoBound)]
    pub struct GenesisConfig<T: Config> {
        /// Initial owner (may mint)
        pub owner: Option<T::AccountId>,
        /// Initial whitelister (configures LGE rounds)
        pub whitelister: Option<T::AccountId>,
        pub token_name: Vec<u8>,
        pub token_symbol: Vec<u8>,
        pub decimals: u8,
        /// Initial token mints (account, amount); the total must fit under the cap
        pub initial_balances: Vec<(T::AccountId, u128)>,
    }

    #[pallet::genesis_build]
    impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
        fn build(&self) {
            let name: BoundedVec<u8, ConstU32<64>> =
                self.token_name.clone().try_into().expect("Token name too long (max 64 bytes)");
            TokenName::<T>::put(name);

            let symbol: BoundedVec<u8, ConstU32<16>> =
                self.token_symbol.clone().try_into().expect("Token symbol too long (max 16 bytes)");
            TokenSymbol::<T>::put(symbol);

            Decimals::<T>::put(self.decimals);
            AccessControl::<T>::put(Roles::new(self.owner.clone(), self.whitelister.clone()));

            let mut total: u128 = 0;
            for (account, amount) in &self.initial_balances {
                Balances::<T>::mutate(account, |balance| *balance = balance.saturating_add(*amount));
                total = total.saturating_add(*amount);
            }
            assert!(total <= T::SupplyCap::get(), "Initial balances exceed the supply cap");
            TotalSupply::<T>::put(total);
        }
    }
}

impl<T: Config> Pallet<T> {
    /// Moves `amount` from `from` to `to` behind the LGE gate.
    ///
    /// Gate and ledger are both checked before anything is written, so an
    /// error leaves storage exactly as it was. Other pallets (e.g. the DEX
    /// holding the pair account) move tokens through here.
    pub fn do_transfer(from: &T::AccountId, to: &T::AccountId, amount: u128) -> DispatchResult {
        Self::gated_transfer(from, to, amount).map(|_| ())
    }

    fn gated_transfer(
        from: &T::AccountId,
        to: &T::AccountId,
        amount: u128,
    ) -> Result<Verdict, DispatchError> {
        let verdict = Self::gate_verdict(from, to, amount)?;

        let sender_balance =
            Balances::<T>::get(from).checked_sub(amount).ok_or(Error::<T>::InsufficientBalance)?;
        let recipient_balance = if from == to {
            None
        } else {
            Some(Balances::<T>::get(to).checked_add(amount).ok_or(Error::<T>::Overflow)?)
        };

        Self::record_verdict(to, amount, verdict);
        if let Some(recipient_balance) = recipient_balance {
            Balances::<T>::insert(from, sender_balance);
            Balances::<T>::insert(to, recipient_balance);
        }

        Self::deposit_event(Event::Transferred { from: from.clone(), to: to.clone(), amount });
        Ok(verdict)
    }

    fn gate_verdict(
        from: &T::AccountId,
        to: &T::AccountId,
        amount: u128,
    ) -> Result<Verdict, Error<T>> {
        let pair = LgePair::<T>::get();
        // skip round reads for ordinary transfers
        if pair.as_ref() != Some(from) {
            return Ok(Verdict::Unrestricted);
        }

        let rounds = Rounds::<T>::get();
        let index = CurrentRound::<T>::get();
        let current = rounds.get(index as usize).map(|round| (index, round));
        let epoch = WhitelistEpoch::<T>::get();

        gate::evaluate(pair.as_ref(), current, from, amount, Self::now(), |round| {
            Memberships::<T>::get((epoch, round, to))
        })
        .map_err(|denial| {
            log::debug!(target: LOG_TARGET, "Gated buy of {amount} rejected: {denial:?}");
            denial.into()
        })
    }

    fn record_verdict(buyer: &T::AccountId, amount: u128, verdict: Verdict) {
        let (round, bought) = match verdict {
            Verdict::Unrestricted => return,
            Verdict::Started { round, start_time } => {
                Self::start_round(round, start_time);
                return;
            },
            Verdict::Purchase { round, started_at, bought } => {
                if let Some(start_time) = started_at {
                    Self::start_round(round, start_time);
                }
                (round, bought)
            },
        };

        let epoch = WhitelistEpoch::<T>::get();
        Memberships::<T>::mutate((epoch, round, buyer), |membership| membership.bought = bought);
        Self::deposit_event(Event::WhitelistPurchase {
            round,
            buyer: buyer.clone(),
            amount,
            bought,
        });
    }

    fn start_round(round: RoundIndex, start_time: u64) {
        Rounds::<T>::mutate(|rounds| {
            if let Some(entry) = rounds.get_mut(round as usize) {
                entry.start_time = Some(start_time);
            }
        });
        log::debug!(target: LOG_TARGET, "LGE round {round} started at {start_time}");
        Self::deposit_event(Event::WhitelistRoundStarted { round, start_time });
    }

    fn set_allowance(owner: &T::AccountId, spender: &T::AccountId, amount: u128) {
        Allowances::<T>::insert(owner, spender, amount);
        Self::deposit_event(Event::Approval {
            owner: owner.clone(),
            spender: spender.clone(),
            amount,
        });
    }

    fn now() -> u64 {
        T::TimeProvider::now().as_secs()
    }

    fn zero_account() -> T::AccountId {
        T::AccountId::decode(&mut TrailingZeroInput::zeroes())
            .expect("infinite length input; no invalid inputs for type; qed")
    }

    pub fn owner() -> Option<T::AccountId> {
        AccessControl::<T>::get().owner
    }

    pub fn current_whitelister() -> Option<T::AccountId> {
        AccessControl::<T>::get().whitelister
    }

    pub fn rounds() -> Vec<Round> {
        Rounds::<T>::get().into_inner()
    }

    /// State of the round under the pointer, `None` when no rounds are configured.
    pub fn current_round_report() -> Option<RoundReport> {
        let index = CurrentRound::<T>::get();
        Rounds::<T>::get().get(index as usize).map(|round| round.report(index, Self::now()))
    }

    pub fn membership_in_current_round(who: &T::AccountId) -> Membership {
        let index = CurrentRound::<T>::get();
        if (index as usize) >= Rounds::<T>::decode_len().unwrap_or(0) {
            return Membership::default();
        }
        Memberships::<T>::get((WhitelistEpoch::<T>::get(), index, who))
    }

    pub fn is_whitelisted_in_current_round(who: &T::AccountId) -> bool {
        Self::membership_in_current_round(who).whitelisted
    }

    pub fn purchased_in_current_round(who: &T::AccountId) -> u128 {
        Self::membership_in_current_round(who).bought
    }
}

impl<T: Config> From<RoleError> for Error<T> {
    fn from(err: RoleError) -> Self {
        match err {
            RoleError::NotOwner => Error::NotOwner,
            RoleError::NotWhitelister => Error::NotWhitelister,
            RoleError::ZeroAddress => Error::ZeroAddressNotAllowed,
        }
    }
}

impl<T: Config> From<rounds::ConfigError> for Error<T> {
    fn from(err: rounds::ConfigError) -> Self {
        match err {
            rounds::ConfigError::LengthMismatch => Error::InvalidWhitelistConfig,
        }
    }
}

impl<T: Config> From<Denial> for Error<T> {
    fn from(denial: Denial) -> Self {
        match denial {
            Denial::NotWhitelisted => Error::NotWhitelisted,
            Denial::ExceedsWhitelistMax => Error::ExceedsWhitelistMax,
        }
    }
}
