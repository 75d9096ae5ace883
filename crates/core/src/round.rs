use crate::{
    generate_deck, normalize_identifier, select_questions, Card, Deck, Event, EventBus,
    GradeResult, Phase, QuestionPolicy, RngState,
};

/// One pass through the deck followed by a quiz on selected positions.
#[derive(Debug, Clone)]
pub struct Round {
    policy: QuestionPolicy,
    deck: Deck,
    current: usize,
    phase: Phase,
    positions: Vec<usize>,
    answers: Vec<String>,
    results: Vec<GradeResult>,
}

impl Round {
    pub fn new(policy: QuestionPolicy, rng: &mut RngState) -> Self {
        Self::with_deck(policy, generate_deck(rng))
    }

    pub fn with_deck(policy: QuestionPolicy, deck: Deck) -> Self {
        Self {
            policy,
            deck,
            current: 0,
            phase: Phase::Revealing,
            positions: Vec::new(),
            answers: Vec::new(),
            results: Vec::new(),
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn policy(&self) -> &QuestionPolicy {
        &self.policy
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_card(&self) -> Option<&Card> {
        self.deck.get(self.current)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn quiz_positions(&self) -> &[usize] {
        &self.positions
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    pub fn results(&self) -> &[GradeResult] {
        &self.results
    }

    /// Steps to the next card, or opens the quiz from the last card.
    pub fn advance(&mut self, rng: &mut RngState, events: &mut EventBus) {
        if self.phase != Phase::Revealing || self.deck.is_empty() {
            return;
        }
        if self.current + 1 < self.deck.len() {
            self.current += 1;
            events.push(Event::CardFlipped {
                index: self.current,
            });
            return;
        }
        self.positions = select_questions(&self.policy, self.deck.len(), rng);
        self.answers = vec![String::new(); self.positions.len()];
        self.results.clear();
        self.phase = Phase::Quizzing;
        log::debug!("quiz started at positions {:?}", self.positions);
        events.push(Event::PhaseChanged {
            phase: Phase::Quizzing,
        });
        events.push(Event::QuizStarted {
            positions: self.positions.clone(),
        });
    }

    pub fn retreat(&mut self, events: &mut EventBus) {
        if self.phase != Phase::Revealing || self.current == 0 {
            return;
        }
        self.current -= 1;
        events.push(Event::CardFlipped {
            index: self.current,
        });
    }

    pub fn set_answer(&mut self, slot: usize, answer: impl Into<String>, events: &mut EventBus) {
        let Some(entry) = self.answers.get_mut(slot) else {
            return;
        };
        *entry = answer.into();
        events.push(Event::AnswerSet { slot });
    }

    /// Grades every slot without touching stored state.
    pub fn evaluate(&self) -> Vec<GradeResult> {
        self.positions
            .iter()
            .enumerate()
            .filter_map(|(slot, &position)| {
                let correct = *self.deck.get(position)?;
                let answer = self.answers.get(slot).map(String::as_str).unwrap_or("");
                let passed = normalize_identifier(answer) == normalize_identifier(&correct.identifier());
                Some(GradeResult {
                    slot,
                    position,
                    passed,
                    correct,
                })
            })
            .collect()
    }

    pub fn grade(&mut self, events: &mut EventBus) -> &[GradeResult] {
        self.results = self.evaluate();
        let passed = self.results.iter().filter(|result| result.passed).count();
        events.push(Event::Graded {
            passed,
            total: self.results.len(),
        });
        &self.results
    }

    pub fn restart(&mut self, rng: &mut RngState, events: &mut EventBus) {
        self.deck = generate_deck(rng);
        self.current = 0;
        self.positions.clear();
        self.answers.clear();
        self.results.clear();
        let left_quiz = self.phase != Phase::Revealing;
        self.phase = Phase::Revealing;
        if left_quiz {
            events.push(Event::PhaseChanged {
                phase: Phase::Revealing,
            });
        }
        events.push(Event::RoundRestarted);
        events.push(Event::CardFlipped { index: 0 });
    }
}
