use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    pub fn symbol(self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
        }
    }

    /// ASCII letter used in asset file names.
    pub fn letter(self) -> char {
        match self {
            Suit::Spades => 'S',
            Suit::Hearts => 'H',
            Suit::Diamonds => 'D',
            Suit::Clubs => 'C',
        }
    }

    /// Accepts either the suit symbol or its ASCII letter, any case.
    pub fn from_char(ch: char) -> Option<Self> {
        match ch.to_ascii_uppercase() {
            '♠' | 'S' => Some(Suit::Spades),
            '♥' | 'H' => Some(Suit::Hearts),
            '♦' | 'D' => Some(Suit::Diamonds),
            '♣' | 'C' => Some(Suit::Clubs),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        let upper = value.trim().to_ascii_uppercase();
        Rank::ALL.into_iter().find(|rank| rank.label() == upper)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Display identifier, e.g. `A♠` or `10♥`.
    pub fn identifier(&self) -> String {
        format!("{}{}", self.rank.label(), self.suit.symbol())
    }

    /// Card image base name, e.g. `AS` or `10H`.
    pub fn asset_name(&self) -> String {
        format!("{}{}", self.rank.label(), self.suit.letter())
    }

    /// Parses `A♠`, `as`, ` 10h ` and similar. The suit is the last character.
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        let suit_char = trimmed.chars().last()?;
        let suit = Suit::from_char(suit_char)?;
        let rank_part = &trimmed[..trimmed.len() - suit_char.len_utf8()];
        let rank = Rank::from_label(rank_part)?;
        Some(Self::new(rank, suit))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}

pub fn asset_name(card: &Card) -> String {
    card.asset_name()
}

/// Canonical form used when grading: trimmed, upper-cased, suit symbols
/// replaced by their ASCII letters.
pub fn normalize_identifier(value: &str) -> String {
    value
        .trim()
        .chars()
        .map(|ch| match Suit::from_char(ch) {
            Some(suit) if !ch.is_ascii() => suit.letter(),
            _ => ch.to_ascii_uppercase(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_uses_suit_symbol() {
        assert_eq!(Card::new(Rank::Ace, Suit::Spades).identifier(), "A♠");
        assert_eq!(Card::new(Rank::Ten, Suit::Hearts).to_string(), "10♥");
    }

    #[test]
    fn parse_accepts_symbols_and_letters() {
        let ten_hearts = Card::new(Rank::Ten, Suit::Hearts);
        assert_eq!(Card::parse("10♥"), Some(ten_hearts));
        assert_eq!(Card::parse(" 10h "), Some(ten_hearts));
        assert_eq!(Card::parse("qd"), Some(Card::new(Rank::Queen, Suit::Diamonds)));
        assert_eq!(Card::parse("1S"), None);
        assert_eq!(Card::parse(""), None);
    }

    #[test]
    fn normalize_maps_symbols_to_letters() {
        assert_eq!(normalize_identifier(" as "), "AS");
        assert_eq!(normalize_identifier("a♠"), "AS");
        assert_eq!(normalize_identifier("10♣"), "10C");
    }
}
