use std::collections::BTreeSet;

use error_stack::report;
use thiserror::Error;

use crate::domain::entry::Entry;

use super::{cell_range::CellRange, column::ColumnLetters};

pub mod sheet_names {
    pub const GUESS: &str = "Guess";
    pub const TOTAL: &str = "Total";
    pub const ROUND: &str = "Round";

    pub const ALL: [&str; 3] = [GUESS, TOTAL, ROUND];
}

pub const PLAYER_COUNT_LABEL: &str = "Number of players";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoreSheetError {
    #[error("cannot build a score sheet without songs")]
    NoSongs,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Text(String),
    Number(i64),
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_owned())
    }
}

/// A rectangle of values destined for one sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetBlock {
    pub range: CellRange,
    pub rows: Vec<Vec<CellValue>>,
}

/// Everything written to the Guess, Total and Round sheets.
///
/// Players occupy columns `A..col(P)` on every sheet. On Round, column
/// `col(P+1)` holds each song's owner and `col(P+2)` its url, while
/// `col(P+2)` rows 1-2 hold the player count used by the penalty rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreSheetFormulas {
    pub players: Vec<String>,
    pub effective_player_count: usize,
    pub blocks: Vec<SheetBlock>,
}

/// Host guesses are not scored, so they do not count as a player.
pub fn effective_player_count(players: &[String], host: Option<&str>) -> usize {
    match host {
        Some(host) if players.iter().any(|player| player == host) => players.len() - 1,
        _ => players.len(),
    }
}

pub fn sorted_players(entries: &[Entry]) -> Vec<String> {
    entries
        .iter()
        .map(|entry| entry.player.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}

impl ScoreSheetFormulas {
    pub fn generate(
        entries: &[Entry],
        host: Option<&str>,
    ) -> error_stack::Result<Self, ScoreSheetError> {
        if entries.is_empty() {
            return Err(report!(ScoreSheetError::NoSongs));
        }

        let players = sorted_players(entries);
        let effective_player_count = effective_player_count(&players, host);
        let layout = Layout::new(players.len() as u32, entries.len() as u32);

        let mut blocks = Vec::new();
        blocks.extend(layout.guess_blocks(&players));
        blocks.extend(layout.total_blocks(&players));
        blocks.extend(layout.round_blocks(&players, entries, effective_player_count));

        Ok(Self {
            players,
            effective_player_count,
            blocks,
        })
    }
}

struct Layout {
    player_count: u32,
    song_count: u32,
    letters: ColumnLetters,
}

impl Layout {
    fn new(player_count: u32, song_count: u32) -> Self {
        Self {
            player_count,
            song_count,
            letters: ColumnLetters::up_to(player_count + 2),
        }
    }

    fn col(&self, column: u32) -> &str {
        self.letters.get(column)
    }

    fn last_player_col(&self) -> &str {
        self.col(self.player_count)
    }

    fn song_player_col(&self) -> &str {
        self.col(self.player_count + 1)
    }

    fn player_count_col(&self) -> &str {
        self.col(self.player_count + 2)
    }

    /// Last row used by per-song data on Round; Guess keeps its tally there
    fn last_song_row(&self) -> u32 {
        self.song_count + 2
    }

    fn player_columns(&self) -> impl Iterator<Item = u32> {
        1..=self.player_count
    }

    fn player_row(&self, sheet: &str, row: u32, players: &[String]) -> SheetBlock {
        SheetBlock {
            range: CellRange::new((1u32, row), (self.player_count, row)).with_sheet_title(sheet),
            rows: vec![header(players)],
        }
    }

    fn guess_blocks(&self, players: &[String]) -> Vec<SheetBlock> {
        let tally_row = self.last_song_row();
        let last = self.last_player_col();
        let last_guess_row = self.song_count + 1;

        let tally = self
            .player_columns()
            .map(|i| {
                CellValue::Text(format!(
                    "=COUNTIF($A$2:${last}${last_guess_row},{}1)",
                    self.col(i)
                ))
            })
            .collect();

        vec![
            self.player_row(sheet_names::GUESS, 1, players),
            SheetBlock {
                range: CellRange::new((1u32, tally_row), (self.player_count, tally_row))
                    .with_sheet_title(sheet_names::GUESS),
                rows: vec![tally],
            },
        ]
    }

    fn total_blocks(&self, players: &[String]) -> Vec<SheetBlock> {
        let totals = self
            .player_columns()
            .map(|i| CellValue::Text(format!("=Round!{}2", self.col(i))))
            .collect();

        vec![SheetBlock {
            range: CellRange::new((1u32, 1u32), (self.player_count, 2u32))
                .with_sheet_title(sheet_names::TOTAL),
            rows: vec![header(players), totals],
        }]
    }

    fn round_blocks(
        &self,
        players: &[String],
        entries: &[Entry],
        effective_player_count: usize,
    ) -> Vec<SheetBlock> {
        let last_song_row = self.last_song_row();

        let sums = self
            .player_columns()
            .map(|i| {
                let c = self.col(i);
                CellValue::Text(format!("=SUM({c}3:{c}{last_song_row})"))
            })
            .collect();

        let mut scores = vec![header(players), sums];
        scores.extend((3..=last_song_row).map(|row| {
            self.player_columns()
                .map(|i| CellValue::Text(self.song_score_formula(i, row)))
                .collect()
        }));

        let player_count_column = self.player_count + 2;
        let songs = entries
            .iter()
            .map(|entry| {
                vec![
                    CellValue::Text(entry.player.clone()),
                    CellValue::Text(entry.url.clone()),
                ]
            })
            .collect();

        vec![
            SheetBlock {
                range: CellRange::new((1u32, 1u32), (self.player_count, last_song_row))
                    .with_sheet_title(sheet_names::ROUND),
                rows: scores,
            },
            SheetBlock {
                range: CellRange::new((player_count_column, 1u32), (player_count_column, 2u32))
                    .with_sheet_title(sheet_names::ROUND),
                rows: vec![
                    vec![CellValue::from(PLAYER_COUNT_LABEL)],
                    vec![CellValue::Number(effective_player_count as i64)],
                ],
            },
            SheetBlock {
                range: CellRange::new(
                    (self.player_count + 1, 3u32),
                    (player_count_column, last_song_row),
                )
                .with_sheet_title(sheet_names::ROUND),
                rows: songs,
            },
        ]
    }

    /// Score of the guesser in column `column` for the song on Round row `row`.
    ///
    /// Guessers other than the owner get 1 for naming the owner. The owner gets
    /// one point per player who named them, or -2 when every other player did.
    fn song_score_formula(&self, column: u32, row: u32) -> String {
        let c = self.col(column);
        let last = self.last_player_col();
        let count_col = self.player_count_col();
        let guess_row = row - 1;

        let owner = format!("${}{row}", self.song_player_col());
        let own_guess = format!("COUNTIF(Guess!{c}{guess_row},{owner})");
        let all_guesses = format!("COUNTIF(Guess!$A{guess_row}:${last}{guess_row},{owner})");

        format!(
            "=IF({c}$1<>{owner},{own_guess},IF({all_guesses}-{own_guess}=${count_col}$2-1,-2,{all_guesses}-{own_guess}))"
        )
    }
}

fn header(players: &[String]) -> Vec<CellValue> {
    players.iter().map(|p| CellValue::Text(p.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sheets::a1_notation::ToA1Notation;

    fn entries() -> Vec<Entry> {
        vec![
            Entry::new("bob", "https://youtu.be/1"),
            Entry::new("alice", "https://youtu.be/2"),
            Entry::new("carol", "https://youtu.be/3"),
            Entry::new("bob", "https://youtu.be/4"),
        ]
    }

    fn block_ranges(formulas: &ScoreSheetFormulas) -> Vec<String> {
        formulas
            .blocks
            .iter()
            .map(|block| block.range.to_qualified_a1_notation().0)
            .collect()
    }

    fn text(value: &str) -> CellValue {
        CellValue::Text(value.to_owned())
    }

    #[test]
    fn test_players_are_sorted_and_distinct() {
        assert_eq!(sorted_players(&entries()), vec!["alice", "bob", "carol"]);
    }

    #[test]
    fn test_effective_player_count() {
        let players = sorted_players(&entries());
        assert_eq!(effective_player_count(&players, None), 3);
        assert_eq!(effective_player_count(&players, Some("bob")), 2);
        assert_eq!(effective_player_count(&players, Some("dave")), 3);
    }

    #[test]
    fn test_block_ranges() {
        let formulas = ScoreSheetFormulas::generate(&entries(), None).unwrap();
        assert_eq!(
            block_ranges(&formulas),
            vec![
                "'Guess'!A1:C1",
                "'Guess'!A6:C6",
                "'Total'!A1:C2",
                "'Round'!A1:C6",
                "'Round'!E1:E2",
                "'Round'!D3:E6",
            ]
        );
    }

    #[test]
    fn test_block_shapes_match_ranges() {
        let formulas = ScoreSheetFormulas::generate(&entries(), Some("alice")).unwrap();
        for block in &formulas.blocks {
            let (start, end) = (block.range.start, block.range.end);
            assert_eq!(block.rows.len() as u32, end.row.0 - start.row.0 + 1);
            for row in &block.rows {
                assert_eq!(row.len() as u32, end.col.0 - start.col.0 + 1);
            }
        }
    }

    #[test]
    fn test_guess_tally_formulas() {
        let formulas = ScoreSheetFormulas::generate(&entries(), None).unwrap();
        assert_eq!(
            formulas.blocks[1].rows[0],
            vec![
                text("=COUNTIF($A$2:$C$5,A1)"),
                text("=COUNTIF($A$2:$C$5,B1)"),
                text("=COUNTIF($A$2:$C$5,C1)"),
            ]
        );
    }

    #[test]
    fn test_total_references_round() {
        let formulas = ScoreSheetFormulas::generate(&entries(), None).unwrap();
        assert_eq!(
            formulas.blocks[2].rows[1],
            vec![text("=Round!A2"), text("=Round!B2"), text("=Round!C2")]
        );
    }

    #[test]
    fn test_round_formulas() {
        let formulas = ScoreSheetFormulas::generate(&entries(), None).unwrap();
        let round = &formulas.blocks[3];

        assert_eq!(round.rows[0], vec![text("alice"), text("bob"), text("carol")]);
        assert_eq!(round.rows[1][1], text("=SUM(B3:B6)"));
        assert_eq!(
            round.rows[2][0],
            text(
                "=IF(A$1<>$D3,COUNTIF(Guess!A2,$D3),IF(COUNTIF(Guess!$A2:$C2,$D3)-COUNTIF(Guess!A2,$D3)=$E$2-1,-2,COUNTIF(Guess!$A2:$C2,$D3)-COUNTIF(Guess!A2,$D3)))"
            )
        );
        assert_eq!(
            round.rows[5][2],
            text(
                "=IF(C$1<>$D6,COUNTIF(Guess!C5,$D6),IF(COUNTIF(Guess!$A5:$C5,$D6)-COUNTIF(Guess!C5,$D6)=$E$2-1,-2,COUNTIF(Guess!$A5:$C5,$D6)-COUNTIF(Guess!C5,$D6)))"
            )
        );
    }

    #[test]
    fn test_round_side_columns() {
        let formulas = ScoreSheetFormulas::generate(&entries(), Some("carol")).unwrap();

        assert_eq!(
            formulas.blocks[4].rows,
            vec![vec![text(PLAYER_COUNT_LABEL)], vec![CellValue::Number(2)]]
        );
        assert_eq!(
            formulas.blocks[5].rows[0],
            vec![text("bob"), text("https://youtu.be/1")]
        );
        assert_eq!(formulas.blocks[5].rows.len(), 4);
    }

    #[test]
    fn test_wide_player_sets_cross_z() {
        let entries: Vec<Entry> = (0..27)
            .map(|i| Entry::new(format!("player{i:02}"), format!("https://youtu.be/{i}")))
            .collect();
        let formulas = ScoreSheetFormulas::generate(&entries, None).unwrap();

        assert_eq!(
            formulas.blocks[0].range.to_a1_notation(None).0,
            "A1:AA1"
        );
        assert_eq!(formulas.blocks[4].range.to_a1_notation(None).0, "AC1:AC2");
        assert_eq!(formulas.blocks[5].range.to_a1_notation(None).0, "AB3:AC29");
    }

    #[test]
    fn test_no_songs() {
        let error = ScoreSheetFormulas::generate(&[], None).unwrap_err();
        assert_eq!(error.current_context(), &ScoreSheetError::NoSongs);
    }
}
