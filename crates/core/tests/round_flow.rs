use sakura_core::{
    generate_deck, select_questions, Card, Deck, Event, EventBus, Phase, QuestionPolicy, Rank,
    RngState, Round, Suit, CLASSIC_POSITIONS, DECK_SIZE,
};
use std::collections::HashSet;

fn assert_valid_deck(deck: &Deck) {
    assert_eq!(deck.len(), DECK_SIZE);
    let ids: HashSet<String> = deck.iter().map(Card::identifier).collect();
    assert_eq!(ids.len(), DECK_SIZE);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            let count = deck.iter().filter(|card| **card == Card::new(rank, suit)).count();
            assert_eq!(count, 1, "{rank:?} of {suit:?}");
        }
    }
}

fn reveal_all(round: &mut Round, rng: &mut RngState, events: &mut EventBus) {
    for _ in 0..DECK_SIZE {
        round.advance(rng, events);
    }
}

#[test]
fn generated_decks_hold_every_card_once() {
    for seed in 0..20 {
        let mut rng = RngState::from_seed(seed);
        assert_valid_deck(&generate_deck(&mut rng));
    }
}

#[test]
fn same_seed_gives_same_permutation() {
    let a = generate_deck(&mut RngState::from_seed(7));
    let b = generate_deck(&mut RngState::from_seed(7));
    let c = generate_deck(&mut RngState::from_seed(8));
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn random_selection_is_distinct_sorted_and_in_range() {
    let mut rng = RngState::from_seed(11);
    for count in 0..=DECK_SIZE {
        let picked = select_questions(&QuestionPolicy::Random { count }, DECK_SIZE, &mut rng);
        assert_eq!(picked.len(), count);
        assert!(picked.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(picked.iter().all(|pos| *pos < DECK_SIZE));
    }
}

#[test]
fn random_selection_clamps_oversized_requests() {
    let mut rng = RngState::from_seed(3);
    let picked = select_questions(&QuestionPolicy::Random { count: 80 }, 10, &mut rng);
    assert_eq!(picked, (0..10).collect::<Vec<_>>());
}

#[test]
fn fixed_selection_drops_out_of_range_and_duplicates() {
    let mut rng = RngState::from_seed(3);
    let policy = QuestionPolicy::Fixed {
        positions: vec![51, 9, 9, 60, 0],
    };
    assert_eq!(select_questions(&policy, DECK_SIZE, &mut rng), vec![0, 9, 51]);
}

#[test]
fn advance_steps_through_the_deck_then_opens_quiz() {
    let mut rng = RngState::from_seed(1);
    let mut events = EventBus::default();
    let mut round = Round::new(QuestionPolicy::default(), &mut rng);
    for step in 1..DECK_SIZE {
        round.advance(&mut rng, &mut events);
        assert_eq!(round.phase(), Phase::Revealing);
        assert_eq!(round.current_index(), step);
    }
    let flips = events
        .drain()
        .filter(|event| matches!(event, Event::CardFlipped { .. }))
        .count();
    assert_eq!(flips, DECK_SIZE - 1);

    round.advance(&mut rng, &mut events);
    assert_eq!(round.phase(), Phase::Quizzing);
    assert_eq!(round.quiz_positions().len(), 5);
    assert!(round.answers().iter().all(String::is_empty));
    let drained: Vec<Event> = events.drain().collect();
    assert!(drained.contains(&Event::PhaseChanged {
        phase: Phase::Quizzing
    }));
    assert!(!drained
        .iter()
        .any(|event| matches!(event, Event::CardFlipped { .. })));
}

#[test]
fn navigation_is_ignored_outside_its_phase() {
    let mut rng = RngState::from_seed(2);
    let mut events = EventBus::default();
    let mut round = Round::new(QuestionPolicy::classic(), &mut rng);

    round.retreat(&mut events);
    assert_eq!(round.current_index(), 0);
    assert_eq!(round.phase(), Phase::Revealing);
    assert!(events.is_empty());

    reveal_all(&mut round, &mut rng, &mut events);
    let positions = round.quiz_positions().to_vec();
    round.advance(&mut rng, &mut events);
    round.retreat(&mut events);
    assert_eq!(round.phase(), Phase::Quizzing);
    assert_eq!(round.current_index(), DECK_SIZE - 1);
    assert_eq!(round.quiz_positions(), positions.as_slice());
}

#[test]
fn retreat_moves_back_one_card() {
    let mut rng = RngState::from_seed(2);
    let mut events = EventBus::default();
    let mut round = Round::new(QuestionPolicy::default(), &mut rng);
    round.advance(&mut rng, &mut events);
    round.advance(&mut rng, &mut events);
    round.retreat(&mut events);
    assert_eq!(round.current_index(), 1);
    assert_eq!(events.drain().last(), Some(Event::CardFlipped { index: 1 }));
}

#[test]
fn answers_outside_the_quiz_are_ignored() {
    let mut rng = RngState::from_seed(4);
    let mut events = EventBus::default();
    let mut round = Round::new(QuestionPolicy::classic(), &mut rng);
    round.set_answer(0, "AS", &mut events);
    assert!(round.answers().is_empty());

    reveal_all(&mut round, &mut rng, &mut events);
    round.set_answer(9, "AS", &mut events);
    round.set_answer(1, "KH", &mut events);
    round.set_answer(1, "QH", &mut events);
    assert_eq!(round.answers()[1], "QH");
    assert_eq!(round.answers().len(), CLASSIC_POSITIONS.len());
}

#[test]
fn grading_ignores_case_whitespace_and_suit_spelling() {
    let mut round = Round::with_deck(
        QuestionPolicy::Fixed {
            positions: vec![0, 13],
        },
        Deck::standard52(),
    );
    let mut rng = RngState::from_seed(0);
    let mut events = EventBus::default();
    reveal_all(&mut round, &mut rng, &mut events);

    round.set_answer(0, " as ", &mut events);
    round.set_answer(1, "a♥", &mut events);
    let results = round.grade(&mut events).to_vec();
    assert!(results.iter().all(|result| result.passed));
    assert_eq!(results[0].correct.identifier(), "A♠");
    assert_eq!(results[1].position, 13);
}

#[test]
fn grading_is_pure_and_keeps_the_phase() {
    let mut rng = RngState::from_seed(5);
    let mut events = EventBus::default();
    let mut round = Round::new(QuestionPolicy::default(), &mut rng);
    reveal_all(&mut round, &mut rng, &mut events);
    round.set_answer(0, "7C", &mut events);

    let first = round.grade(&mut events).to_vec();
    let second = round.grade(&mut events).to_vec();
    assert_eq!(first, second);
    assert_eq!(round.evaluate(), first);
    assert_eq!(round.phase(), Phase::Quizzing);
    let blank = first.iter().filter(|result| !result.passed).count();
    assert!(blank >= 4);
}

#[test]
fn restart_returns_to_a_fresh_reveal() {
    let mut rng = RngState::from_seed(6);
    let mut events = EventBus::default();
    let mut round = Round::new(QuestionPolicy::default(), &mut rng);
    reveal_all(&mut round, &mut rng, &mut events);
    round.grade(&mut events);

    round.restart(&mut rng, &mut events);
    assert_eq!(round.current_index(), 0);
    assert_eq!(round.phase(), Phase::Revealing);
    assert!(round.quiz_positions().is_empty());
    assert!(round.answers().is_empty());
    assert!(round.results().is_empty());
    assert_valid_deck(round.deck());
    let drained: Vec<Event> = events.drain().collect();
    assert!(drained.contains(&Event::RoundRestarted));
    assert_eq!(drained.last(), Some(&Event::CardFlipped { index: 0 }));
}

#[test]
fn classic_positions_all_correct_scores_five() {
    let mut rng = RngState::from_seed(0xC0FFEE);
    let mut events = EventBus::default();
    let mut round = Round::new(QuestionPolicy::classic(), &mut rng);
    for _ in 0..DECK_SIZE - 1 {
        round.advance(&mut rng, &mut events);
    }
    assert_eq!(round.phase(), Phase::Revealing);
    round.advance(&mut rng, &mut events);
    assert_eq!(round.phase(), Phase::Quizzing);
    assert_eq!(round.quiz_positions(), CLASSIC_POSITIONS.as_slice());

    let answers: Vec<String> = round
        .quiz_positions()
        .iter()
        .map(|pos| round.deck().get(*pos).map(Card::asset_name).unwrap_or_default())
        .collect();
    for (slot, answer) in answers.into_iter().enumerate() {
        round.set_answer(slot, answer, &mut events);
    }
    let results = round.grade(&mut events);
    assert_eq!(results.len(), 5);
    assert!(results.iter().all(|result| result.passed));
    assert!(events
        .drain()
        .any(|event| event == Event::Graded { passed: 5, total: 5 }));
}
