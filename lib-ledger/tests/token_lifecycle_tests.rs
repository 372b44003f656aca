//! End-to-end token lifecycle tests: genesis allocation, fee-charging
//! transfers, rebase cycles, pool management and administrative flows
//! exercised through the public facade only.

use lib_ledger::{
    Allocation, AllocationPlan, ElasticToken, FeeSplit, FeeTable, LedgerError, LedgerEvent,
    PoolFeeExemption, RebasePolicy, TokenConfig,
};
use lib_types::{Address, SCALE};

fn addr(id: u8) -> Address {
    Address::new([id; 32])
}

const OWNER: u8 = 1;
const TREASURY: u8 = 2;

fn config_with(fee_table: FeeTable, allocations: AllocationPlan) -> TokenConfig {
    TokenConfig {
        name: "Index Token".to_string(),
        symbol: "IDX".to_string(),
        decimals: 18,
        initial_anchor: 1_000_000,
        owner: addr(OWNER),
        treasury: addr(TREASURY),
        fee_table,
        rebase_policy: RebasePolicy::DEFAULT,
        pool_fee_exemption: PoolFeeExemption {
            exempt_as_sender: true,
            exempt_as_recipient: true,
        },
        allocations,
    }
}

fn default_token() -> ElasticToken {
    let config = config_with(
        FeeTable::flat(addr(TREASURY), 200).unwrap(),
        AllocationPlan::treasury_only(),
    );
    ElasticToken::new(config, 0).unwrap()
}

#[test]
fn test_genesis_seven_bucket_plan_sums_exactly() {
    let plan = AllocationPlan::new(vec![
        Allocation { wallet: addr(10), percent: 50, label: "public sale".to_string() },
        Allocation { wallet: addr(11), percent: 10, label: "developer treasury".to_string() },
        Allocation { wallet: addr(12), percent: 20, label: "liquidity".to_string() },
        Allocation { wallet: addr(13), percent: 7, label: "marketing".to_string() },
        Allocation { wallet: addr(14), percent: 5, label: "staking".to_string() },
        Allocation { wallet: addr(15), percent: 3, label: "community".to_string() },
        Allocation { wallet: addr(16), percent: 5, label: "reserve".to_string() },
    ])
    .unwrap();

    let config = config_with(FeeTable::flat(addr(TREASURY), 200).unwrap(), plan);
    let token = ElasticToken::new(config, 0).unwrap();

    let supply = token.total_supply();
    assert_eq!(supply, 1_000_000 * SCALE);
    assert_eq!(token.balance_of(&addr(10)), supply / 2);
    assert_eq!(token.balance_of(&addr(11)), supply / 10);
    assert_eq!(token.balance_of(&addr(12)), supply / 5);
    assert_eq!(token.balance_of(&addr(13)), supply * 7 / 100);
    assert_eq!(token.balance_of(&addr(14)), supply / 20);
    assert_eq!(token.balance_of(&addr(15)), supply * 3 / 100);
    assert_eq!(token.balance_of(&addr(16)), supply / 20);
    assert!(token.verify_supply_invariant());
}

#[test]
fn test_transfer_chain_preserves_supply() {
    let mut token = default_token();
    let supply = token.total_supply();

    token.transfer(addr(TREASURY), addr(3), 10_000 * SCALE).unwrap();
    token.transfer(addr(3), addr(4), 5_000 * SCALE).unwrap();
    token.transfer(addr(4), addr(5), 1_000 * SCALE).unwrap();

    // fees recycle into the treasury, supply is untouched
    assert_eq!(token.total_supply(), supply);
    assert!(token.verify_supply_invariant());
}

#[test]
fn test_split_fee_transfer_additivity() {
    let fee_table = FeeTable::new(
        vec![
            FeeSplit { recipient: addr(20), rate_bps: 20 },
            FeeSplit { recipient: addr(21), rate_bps: 16 },
            FeeSplit { recipient: addr(22), rate_bps: 12 },
        ],
        48,
    )
    .unwrap();
    let config = config_with(fee_table, AllocationPlan::treasury_only());
    let mut token = ElasticToken::new(config, 0).unwrap();

    let (outcome, _) = token.transfer(addr(TREASURY), addr(3), 1_000 * SCALE).unwrap();

    assert_eq!(outcome.gross, 1_000 * SCALE);
    assert_eq!(token.balance_of(&addr(20)), 2 * SCALE);
    assert_eq!(token.balance_of(&addr(21)), 1_600_000_000_000_000_000);
    assert_eq!(token.balance_of(&addr(22)), 1_200_000_000_000_000_000);
    let shares: u128 = outcome.fee_shares.iter().map(|(_, s)| s).sum();
    assert_eq!(shares + outcome.net, outcome.gross);
    assert!(token.verify_supply_invariant());
}

#[test]
fn test_transfer_failures_leave_state_unchanged() {
    let mut token = default_token();
    let before = token.balance_of(&addr(TREASURY));

    assert_eq!(
        token.transfer(addr(TREASURY), addr(3), 0).unwrap_err(),
        LedgerError::ZeroAmount
    );
    assert_eq!(
        token.transfer(addr(TREASURY), Address::zero(), SCALE).unwrap_err(),
        LedgerError::ZeroAddress
    );
    assert!(matches!(
        token.transfer(addr(7), addr(3), SCALE).unwrap_err(),
        LedgerError::InsufficientBalance { .. }
    ));

    assert_eq!(token.balance_of(&addr(TREASURY)), before);
    assert_eq!(token.balance_of(&addr(3)), 0);
}

#[test]
fn test_rebase_up_then_down_cycle() {
    let mut token = default_token();
    token.transfer(addr(TREASURY), addr(3), 333 * SCALE + 1).unwrap();
    let supply = token.total_supply();

    // +50% anchor move, inside the clamp
    token.rebase(&addr(OWNER), 1_500_000, 86_400).unwrap();
    assert_eq!(token.total_supply(), supply * 3 / 2);
    assert!(token.verify_supply_invariant());

    // -40% from the new anchor, also inside the clamp
    token.rebase(&addr(OWNER), 900_000, 2 * 86_400).unwrap();
    assert!(token.verify_supply_invariant());
    assert_eq!(token.last_anchor(), 900_000);
}

#[test]
fn test_rebase_residual_lands_in_treasury() {
    let mut token = default_token();
    // odd balances so the halving floors per account
    token.transfer(addr(TREASURY), addr(3), 100 * SCALE + 3).unwrap();
    token.transfer(addr(TREASURY), addr(4), 100 * SCALE + 5).unwrap();

    token.rebase(&addr(OWNER), 500_000, 86_400).unwrap();

    // per-account floors must still sum to the rescaled total
    assert!(token.verify_supply_invariant());
}

#[test]
fn test_rebase_interval_throttle() {
    let mut token = default_token();

    assert!(matches!(
        token.rebase(&addr(OWNER), 2_000_000, 86_399),
        Err(LedgerError::RebaseTooSoon { .. })
    ));

    token.rebase(&addr(OWNER), 2_000_000, 86_400).unwrap();

    assert!(matches!(
        token.rebase(&addr(OWNER), 3_000_000, 2 * 86_400 - 1),
        Err(LedgerError::RebaseTooSoon { .. })
    ));
    assert!(token.rebase(&addr(OWNER), 3_000_000, 2 * 86_400).is_ok());
}

#[test]
fn test_rebase_decrease_clamped_to_half() {
    let mut token = default_token();
    let supply = token.total_supply();

    // 90% anchor drop is clamped to -50%
    token.rebase(&addr(OWNER), 100_000, 86_400).unwrap();
    assert_eq!(token.total_supply(), supply / 2);
    assert_eq!(token.last_anchor(), 100_000);
    assert!(token.verify_supply_invariant());
}

#[test]
fn test_rebase_zero_anchor_rejected() {
    let mut token = default_token();
    assert_eq!(
        token.rebase(&addr(OWNER), 0, 86_400).unwrap_err(),
        LedgerError::ZeroAnchor
    );
}

#[test]
fn test_pool_exemption_and_swap_remove() {
    let mut token = default_token();
    token.add_liquidity_pool(&addr(OWNER), addr(30)).unwrap();
    token.add_liquidity_pool(&addr(OWNER), addr(31)).unwrap();
    token.add_liquidity_pool(&addr(OWNER), addr(32)).unwrap();

    // pool-bound transfer skips the fee entirely
    let (outcome, _) = token.transfer(addr(TREASURY), addr(30), 100 * SCALE).unwrap();
    assert_eq!(outcome.fee_total, 0);
    assert_eq!(token.balance_of(&addr(30)), 100 * SCALE);

    // removing the first pool swaps the last into its slot
    token.remove_liquidity_pool(&addr(OWNER), &addr(30)).unwrap();
    assert_eq!(token.pool_count(), 2);
    assert_eq!(token.pool_at(0), Some(addr(32)));
    assert_eq!(token.pool_at(1), Some(addr(31)));
    assert!(!token.is_pool(&addr(30)));

    assert_eq!(
        token.add_liquidity_pool(&addr(OWNER), addr(31)).unwrap_err(),
        LedgerError::PoolAlreadyRegistered(addr(31))
    );
    assert_eq!(
        token.remove_liquidity_pool(&addr(OWNER), &addr(30)).unwrap_err(),
        LedgerError::PoolNotRegistered(addr(30))
    );
}

#[test]
fn test_pause_gates_mutations_not_queries() {
    let mut token = default_token();
    token.pause(&addr(OWNER)).unwrap();

    assert_eq!(
        token.transfer(addr(TREASURY), addr(3), SCALE).unwrap_err(),
        LedgerError::Paused
    );
    assert_eq!(
        token.burn(addr(TREASURY), SCALE).unwrap_err(),
        LedgerError::Paused
    );

    // queries keep working
    assert_eq!(token.total_supply(), 1_000_000 * SCALE);
    assert!(token.is_paused());

    token.unpause(&addr(OWNER)).unwrap();
    assert!(token.transfer(addr(TREASURY), addr(3), SCALE).is_ok());
}

#[test]
fn test_governor_delegation_flow() {
    let mut token = default_token();
    let governor = addr(40);

    // privileged calls fail before delegation
    assert!(matches!(
        token.pause(&governor),
        Err(LedgerError::Unauthorized(_))
    ));

    let event = token.set_governor(&addr(OWNER), governor).unwrap();
    assert_eq!(event, LedgerEvent::GovernorSet { governor });

    token.pause(&governor).unwrap();
    token.unpause(&governor).unwrap();
    token.rebase(&governor, 1_200_000, 86_400).unwrap();

    // delegation is one-shot
    assert_eq!(
        token.set_governor(&addr(OWNER), addr(41)).unwrap_err(),
        LedgerError::GovernorAlreadySet
    );
    // but never grants ownership
    assert!(matches!(
        token.transfer_ownership(&governor, governor),
        Err(LedgerError::Unauthorized(_))
    ));
}

#[test]
fn test_treasury_update_redirects_rebase_residual() {
    let mut token = default_token();
    token.update_treasury(&addr(OWNER), addr(50)).unwrap();
    assert_eq!(token.treasury(), addr(50));

    assert_eq!(
        token.update_treasury(&addr(OWNER), Address::zero()).unwrap_err(),
        LedgerError::ZeroAddress
    );
    assert!(matches!(
        token.update_treasury(&addr(9), addr(51)),
        Err(LedgerError::Unauthorized(_))
    ));
}

#[test]
fn test_snapshot_roundtrip_after_mixed_operations() {
    let mut token = default_token();
    token.transfer(addr(TREASURY), addr(3), 777 * SCALE).unwrap();
    token.add_liquidity_pool(&addr(OWNER), addr(30)).unwrap();
    token.rebase(&addr(OWNER), 1_300_000, 86_400).unwrap();
    token.mint(&addr(OWNER), addr(4), 5 * SCALE).unwrap();

    let bytes = bincode::serialize(&token).unwrap();
    let restored: ElasticToken = bincode::deserialize(&bytes).unwrap();

    assert_eq!(restored.total_supply(), token.total_supply());
    assert_eq!(restored.balance_of(&addr(3)), token.balance_of(&addr(3)));
    assert_eq!(restored.last_anchor(), 1_300_000);
    assert!(restored.is_pool(&addr(30)));
    assert!(restored.verify_supply_invariant());
}
