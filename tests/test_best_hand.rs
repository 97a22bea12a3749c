use holdem_sim::best_hand::*;
use holdem_sim::cards::*;
use holdem_sim::hand_evaluator::*;
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn cards(tokens: &[&str]) -> Vec<Card> {
    parse_cards(tokens).unwrap()
}

#[test]
fn test_royal_flush_from_seven() {
    let result = best_hand(&cards(&["AH", "KH"]), &cards(&["10H", "JH", "QH", "2C", "3D"])).unwrap();
    assert_eq!(result.rank, HandRank::RoyalFlush);
    assert_eq!(result.values, vec![10, 11, 12, 13, 14]);
}

#[test]
fn test_no_community_returns_hole_values() {
    let result = best_hand(&cards(&["AH", "KH"]), &[]).unwrap();
    assert_eq!(result.rank, HandRank::HighCard);
    assert_eq!(result.values, vec![14, 13]);
}

#[test]
fn test_pocket_pair_without_board_is_high_card() {
    let result = best_hand(&cards(&["7S", "7H"]), &[]).unwrap();
    assert_eq!(result.rank, HandRank::HighCard);
    assert_eq!(result.values, vec![7, 7]);
}

#[test]
fn test_flop_uses_five_cards() {
    let result = best_hand(&cards(&["7S", "7H"]), &cards(&["7D", "KC", "KH"])).unwrap();
    assert_eq!(result.rank, HandRank::FullHouse);
}

#[test]
fn test_turn_picks_best_subset() {
    let result = best_hand(&cards(&["AS", "2S"]), &cards(&["9S", "5S", "KS", "QD"])).unwrap();
    assert_eq!(result.rank, HandRank::Flush);
    assert_eq!(result.values, vec![2, 5, 9, 13, 14]);
}

#[test]
fn test_board_plays() {
    let result = best_hand(&cards(&["2C", "3D"]), &cards(&["5S", "6H", "7D", "8C", "9S"])).unwrap();
    assert_eq!(result.rank, HandRank::Straight);
}

#[test]
fn test_shared_cards_counted_once() {
    let result = best_hand(&cards(&["2C", "3D"]), &cards(&["10H", "JH", "QH", "2C", "3D"])).unwrap();
    assert_eq!(result.rank, HandRank::HighCard);
    assert_eq!(result.values, vec![2, 3, 10, 11, 12]);
}

#[test]
fn test_equal_rank_prefers_higher_top_card() {
    // Two flushes are available; the ace-high one wins on the top card.
    let result = best_hand(&cards(&["AH", "3H"]), &cards(&["4H", "6H", "8H", "9H", "2C"])).unwrap();
    assert_eq!(result.rank, HandRank::Flush);
    assert_eq!(result.high_value(), 14);
}

#[test]
fn test_deterministic() {
    let hole = cards(&["QS", "JD"]);
    let board = cards(&["10C", "9H", "2S", "QD", "3C"]);
    let first = best_hand(&hole, &board).unwrap();
    for _ in 0..5 {
        assert_eq!(best_hand(&hole, &board).unwrap(), first);
    }
}

#[test]
fn test_no_subset_outranks_selection() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..200 {
        let mut deck = Deck::new();
        deck.shuffle(&mut rng);
        let seven = deck.deal(7).unwrap();
        let chosen = best_hand(&seven[..2], &seven[2..]).unwrap();
        for subset in seven.iter().copied().combinations(5) {
            let rank = evaluate(&subset).unwrap().rank;
            assert!(chosen.rank >= rank, "{:?} beats {:?}", subset, chosen);
        }
    }
}

#[test]
fn test_combined_cards_keeps_first_occurrence() {
    let combined = combined_cards(&cards(&["AH", "KH"]), &cards(&["KH", "2C"]));
    assert_eq!(combined, cards(&["AH", "KH", "2C"]));
}
