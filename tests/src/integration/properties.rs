//! # Property Suites
//!
//! Randomized and vector forms of the system's testable properties:
//! monotonic indices, the reserve floor, access-control inertness,
//! overpayment bounds, holder permanence, and address determinism.

#[cfg(test)]
mod tests {
    use crate::support::{TestBench, INITIAL_WALLET_FUNDS, MINT_PRICE};
    use ledger_bus::PROCESSING_FEE;
    use pm_profile_factory::prelude::{
        check_all_invariants, check_reserve_floor, factory_address, STORAGE_RESERVE,
    };
    use pm_profile_item::{item_address, STORAGE_RESERVE as ITEM_RESERVE};
    use rand::Rng;
    use shared_types::{Address, Coins};
    use std::collections::HashSet;

    #[test]
    fn test_indices_are_dense_for_any_mint_count() {
        let count = rand::thread_rng().gen_range(3..=10u64);
        let mut bench = TestBench::new();
        bench.deploy_factory(MINT_PRICE);

        for _ in 0..count {
            let records = bench.issue(bench.student, MINT_PRICE);
            assert!(records.iter().all(|r| r.success));
        }

        assert_eq!(bench.factory_data().next_index, count);
        for index in 0..count {
            assert!(bench.item_data(index).unwrap().initialized);
        }
        assert!(bench.item_data(count).is_none());
    }

    #[test]
    fn test_reserve_floor_survives_mixed_operations() {
        let mut bench = TestBench::new();
        bench.deploy_factory(MINT_PRICE);
        assert!(check_reserve_floor(bench.factory_balance()));

        bench.issue(bench.student, Coins::from_coins(7));
        assert!(check_reserve_floor(bench.factory_balance()));

        bench.withdraw(bench.owner, PROCESSING_FEE);
        assert!(check_reserve_floor(bench.factory_balance()));

        bench.configure(bench.owner, Coins::from_coins(50), Coins::from_coins(1));
        assert!(check_reserve_floor(bench.factory_balance()));

        // A failing issue must not dent the floor either.
        bench.issue(bench.student, Coins::from_coins(1));
        assert!(check_reserve_floor(bench.factory_balance()));

        bench.withdraw(bench.owner, PROCESSING_FEE);
        assert_eq!(bench.factory_balance(), STORAGE_RESERVE);
    }

    #[test]
    fn test_rejected_operations_leave_state_byte_identical() {
        let mut bench = TestBench::new();
        bench.deploy_factory(MINT_PRICE);
        bench.issue(bench.student, MINT_PRICE);

        let data_before = bench.factory_data();
        let balance_before = bench.factory_balance();

        bench.configure(bench.stranger, Coins::from_coins(1), Coins::from_coins(10));
        bench.withdraw(bench.stranger, Coins::from_coins(10));

        assert_eq!(bench.factory_data(), data_before);
        assert_eq!(bench.factory_balance(), balance_before);
    }

    #[test]
    fn test_overpaying_issuer_is_out_at_most_price_plus_bound() {
        let extra = Coins::from_coins(rand::thread_rng().gen_range(0..=100u64));
        let mut bench = TestBench::new();
        bench.deploy_factory(MINT_PRICE);

        let records = bench.issue(bench.student, MINT_PRICE.saturating_add(extra));
        assert!(records.iter().all(|r| r.success));

        // Whatever exceeded the price came back, up to the item's reserve
        // and a bounded number of hop fees.
        let bound = MINT_PRICE
            .saturating_add(ITEM_RESERVE)
            .saturating_add(PROCESSING_FEE)
            .saturating_add(PROCESSING_FEE);
        assert!(
            bench.ledger.balance(bench.student) >= INITIAL_WALLET_FUNDS.saturating_sub(bound)
        );
    }

    #[test]
    fn test_no_sender_can_move_a_holder() {
        let mut bench = TestBench::new();
        bench.deploy_factory(MINT_PRICE);
        bench.issue(bench.student, MINT_PRICE);

        let mut senders = vec![bench.student, bench.owner, bench.stranger];
        for _ in 0..3 {
            let wallet = bench.ledger.create_wallet(Coins::from_coins(10));
            senders.push(wallet);
        }

        for sender in senders {
            let records = bench.transfer_item(sender, 0, Coins::from_nanos(30_000_000));
            assert!(records[0].is_failure());
            assert_eq!(bench.item_data(0).unwrap().holder, bench.student);
        }
    }

    #[test]
    fn test_no_address_collisions_across_owners_salts_and_indices() {
        let owners = [
            Address::new([1u8; 20]),
            Address::new([2u8; 20]),
            Address::new([3u8; 20]),
        ];
        let mut seen = HashSet::new();

        for owner in owners {
            for salt in 0..4u64 {
                let factory = factory_address(owner, salt);
                assert!(seen.insert(factory), "factory address collision");
                for index in 0..8u64 {
                    assert!(
                        seen.insert(item_address(factory, index)),
                        "item address collision"
                    );
                }
            }
        }
    }

    #[test]
    fn test_factory_invariants_hold_across_a_full_scenario() {
        let mut bench = TestBench::new();
        bench.deploy_factory(MINT_PRICE);
        let before = bench.factory_state();

        let mut minted = 0u64;
        for value in [MINT_PRICE, Coins::from_coins(9), Coins::from_coins(1)] {
            let records = bench.issue(bench.student, value);
            if records[0].success {
                minted += 1;
            }
        }
        bench.withdraw(bench.owner, PROCESSING_FEE);
        bench.configure(bench.owner, Coins::from_coins(42), Coins::from_coins(1));

        let after = bench.factory_state();
        let result = check_all_invariants(&before, &after, minted, bench.factory_balance());
        assert!(result.is_valid(), "violations: {result:?}");
        assert_eq!(minted, 2);
    }

    #[test]
    fn test_value_is_conserved_across_every_suite_style_flow() {
        let mut bench = TestBench::new();
        let genesis = bench.ledger.total_balance();

        bench.deploy_factory(MINT_PRICE);
        bench.issue(bench.student, Coins::from_coins(20));
        bench.issue(bench.student, Coins::from_coins(1));
        bench.transfer_item(bench.student, 0, Coins::from_coins(2));
        bench.withdraw(bench.owner, PROCESSING_FEE);

        assert_eq!(
            genesis,
            bench
                .ledger
                .total_balance()
                .saturating_add(bench.ledger.fees_burned())
        );
    }
}
