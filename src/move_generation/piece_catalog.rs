//! Built-in piece types.
//!
//! Orthodox chess pieces plus a set of fairy pieces: the cannon, the
//! nightrider, the grasshopper, the joker, and the classic short leapers.

use std::sync::Arc;

use crate::game_state::chess_types::{BISHOP, KING, KNIGHT, PAWN, QUEEN, ROOK};
use crate::move_generation::rules_resolver::RulesResolver;
use crate::moves::cannon_moves::CannonRule;
use crate::moves::castling_moves::CastlingRule;
use crate::moves::hopper_moves::HopperRule;
use crate::moves::knight_rider_moves::KnightRiderRule;
use crate::moves::leaper_moves::LeaperRule;
use crate::moves::mimic_moves::MimicRule;
use crate::moves::move_rule::RuleSet;
use crate::moves::pawn_moves::{EnPassantRule, PawnCoreRule, PawnDoubleStepRule};
use crate::moves::slider_moves::SliderRule;

pub const CANNON: &str = "Cannon";
pub const NIGHTRIDER: &str = "Nightrider";
pub const GRASSHOPPER: &str = "Grasshopper";
pub const JOKER: &str = "Joker";
pub const CAMEL: &str = "Camel";
pub const ZEBRA: &str = "Zebra";
pub const FERZ: &str = "Ferz";
pub const WAZIR: &str = "Wazir";
pub const ALFIL: &str = "Alfil";
pub const DABBABA: &str = "Dabbaba";

/// Every type installed by `register_standard_pieces`.
pub const STANDARD_TYPES: [&str; 16] = [
    PAWN, KNIGHT, BISHOP, ROOK, QUEEN, KING, CANNON, NIGHTRIDER, GRASSHOPPER, JOKER, CAMEL, ZEBRA,
    FERZ, WAZIR, ALFIL, DABBABA,
];

pub fn pawn_rules() -> RuleSet {
    vec![
        Arc::new(PawnCoreRule),
        Arc::new(PawnDoubleStepRule),
        Arc::new(EnPassantRule),
    ]
}

pub fn king_rules() -> RuleSet {
    vec![Arc::new(LeaperRule::king()), Arc::new(CastlingRule::default())]
}

pub fn register_standard_pieces(resolver: &mut RulesResolver) {
    resolver.register(PAWN, pawn_rules());
    resolver.register(KNIGHT, vec![Arc::new(LeaperRule::knight())]);
    resolver.register(BISHOP, vec![Arc::new(SliderRule::bishop())]);
    resolver.register(ROOK, vec![Arc::new(SliderRule::rook())]);
    resolver.register(QUEEN, vec![Arc::new(SliderRule::queen())]);
    resolver.register(KING, king_rules());

    resolver.register(CANNON, vec![Arc::new(CannonRule::default())]);
    resolver.register(NIGHTRIDER, vec![Arc::new(KnightRiderRule::new())]);
    resolver.register(GRASSHOPPER, vec![Arc::new(HopperRule::grasshopper())]);
    resolver.register(JOKER, vec![Arc::new(MimicRule::new(KING))]);

    resolver.register(CAMEL, vec![Arc::new(LeaperRule::symmetric(3, 1))]);
    resolver.register(ZEBRA, vec![Arc::new(LeaperRule::symmetric(3, 2))]);
    resolver.register(FERZ, vec![Arc::new(LeaperRule::symmetric(1, 1))]);
    resolver.register(WAZIR, vec![Arc::new(LeaperRule::symmetric(1, 0))]);
    resolver.register(ALFIL, vec![Arc::new(LeaperRule::symmetric(2, 2))]);
    resolver.register(DABBABA, vec![Arc::new(LeaperRule::symmetric(2, 0))]);
}

/// A resolver pre-loaded with every built-in type.
pub fn standard_resolver() -> RulesResolver {
    let mut resolver = RulesResolver::new();
    register_standard_pieces(&mut resolver);
    resolver
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_standard_type_has_rules() {
        let resolver = standard_resolver();
        assert_eq!(resolver.len(), STANDARD_TYPES.len());
        for type_name in STANDARD_TYPES {
            assert!(
                !resolver.rules_for(type_name).is_empty(),
                "{type_name} has no rules"
            );
        }
    }

    #[test]
    fn pawn_rules_keep_their_order() {
        let resolver = standard_resolver();
        let signatures: Vec<String> = resolver
            .rules_for(PAWN)
            .iter()
            .map(|r| r.signature())
            .collect();
        assert_eq!(
            signatures,
            vec!["PawnCoreRule", "PawnDoubleStepRule", "EnPassantRule"]
        );
    }

    #[test]
    fn queen_fused_with_knight_keeps_all_distinct_rules() {
        let mut resolver = standard_resolver();
        assert_eq!(resolver.fuse(QUEEN, KNIGHT, "Amazon"), 2);
        assert_eq!(resolver.fuse(QUEEN, QUEEN, "StillQueen"), 1);
    }
}
