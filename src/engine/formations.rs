use serde::Serialize;

use crate::models::amateur_match::MatchFormat;

/// Visual position of a formation slot on the pitch, as percentages of the
/// pitch width/height. Slot 0 is always the goalkeeper.
#[derive(Debug, Serialize, Clone, Copy)]
pub struct SlotPosition {
    pub x: u8,
    pub y: u8,
    pub label: &'static str,
}

#[derive(Debug, Serialize, Clone, Copy)]
pub struct Formation {
    pub name: &'static str,
    pub positions: &'static [SlotPosition],
}

const KEEPER: SlotPosition = SlotPosition {
    x: 50,
    y: 88,
    label: "GK",
};

const fn slot(x: u8, y: u8, label: &'static str) -> SlotPosition {
    SlotPosition { x, y, label }
}

static FIVE: &[Formation] = &[
    Formation {
        name: "2-2",
        positions: &[
            KEEPER,
            slot(30, 60, "DEF"),
            slot(70, 60, "DEF"),
            slot(30, 25, "FWD"),
            slot(70, 25, "FWD"),
        ],
    },
    Formation {
        name: "1-2-1",
        positions: &[
            KEEPER,
            slot(50, 65, "DEF"),
            slot(20, 40, "WING"),
            slot(80, 40, "WING"),
            slot(50, 20, "FWD"),
        ],
    },
];

static SEVEN: &[Formation] = &[
    Formation {
        name: "3-2-1",
        positions: &[
            KEEPER,
            slot(20, 70, "LB"),
            slot(50, 70, "SW"),
            slot(80, 70, "RB"),
            slot(35, 40, "MID"),
            slot(65, 40, "MID"),
            slot(50, 15, "FWD"),
        ],
    },
    Formation {
        name: "2-3-1",
        positions: &[
            KEEPER,
            slot(30, 70, "DEF"),
            slot(70, 70, "DEF"),
            slot(20, 40, "WING"),
            slot(50, 40, "MID"),
            slot(80, 40, "WING"),
            slot(50, 15, "FWD"),
        ],
    },
];

static EIGHT: &[Formation] = &[
    Formation {
        name: "3-3-1",
        positions: &[
            KEEPER,
            slot(20, 70, "DEF"),
            slot(50, 70, "DEF"),
            slot(80, 70, "DEF"),
            slot(20, 40, "MID"),
            slot(50, 40, "MID"),
            slot(80, 40, "MID"),
            slot(50, 15, "FWD"),
        ],
    },
    Formation {
        name: "2-3-2",
        positions: &[
            KEEPER,
            slot(30, 70, "DEF"),
            slot(70, 70, "DEF"),
            slot(20, 45, "WB"),
            slot(50, 45, "MID"),
            slot(80, 45, "WB"),
            slot(35, 20, "FWD"),
            slot(65, 20, "FWD"),
        ],
    },
];

static NINE: &[Formation] = &[Formation {
    name: "3-3-2",
    positions: &[
        KEEPER,
        slot(20, 70, "LB"),
        slot(50, 70, "DEF"),
        slot(80, 70, "RB"),
        slot(25, 45, "MID"),
        slot(50, 45, "MID"),
        slot(75, 45, "MID"),
        slot(35, 20, "FWD"),
        slot(65, 20, "FWD"),
    ],
}];

static ELEVEN: &[Formation] = &[
    Formation {
        name: "4-3-3",
        positions: &[
            KEEPER,
            slot(15, 75, "LB"),
            slot(38, 75, "CB"),
            slot(62, 75, "CB"),
            slot(85, 75, "RB"),
            slot(30, 50, "CM"),
            slot(50, 55, "CDM"),
            slot(70, 50, "CM"),
            slot(20, 25, "LW"),
            slot(50, 20, "ST"),
            slot(80, 25, "RW"),
        ],
    },
    Formation {
        name: "4-4-2",
        positions: &[
            KEEPER,
            slot(15, 75, "LB"),
            slot(38, 75, "CB"),
            slot(62, 75, "CB"),
            slot(85, 75, "RB"),
            slot(15, 50, "LM"),
            slot(38, 50, "CM"),
            slot(62, 50, "CM"),
            slot(85, 50, "RM"),
            slot(35, 25, "ST"),
            slot(65, 25, "ST"),
        ],
    },
];

/// Formation catalog for a given team size.
pub fn formations_for(format: MatchFormat) -> &'static [Formation] {
    match format {
        MatchFormat::Five => FIVE,
        MatchFormat::Seven => SEVEN,
        MatchFormat::Eight => EIGHT,
        MatchFormat::Nine => NINE,
        MatchFormat::Eleven => ELEVEN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_formation_fills_the_team_size() {
        for format in [
            MatchFormat::Five,
            MatchFormat::Seven,
            MatchFormat::Eight,
            MatchFormat::Nine,
            MatchFormat::Eleven,
        ] {
            for formation in formations_for(format) {
                assert_eq!(
                    formation.positions.len(),
                    format.team_size(),
                    "formation {} for {:?}",
                    formation.name,
                    format
                );
                assert_eq!(formation.positions[0].label, "GK");
            }
        }
    }
}
