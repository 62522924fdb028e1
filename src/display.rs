use crate::errors::DisplayError;
use crate::pokemon::PokemonInst;

const COLUMN_GAP: &str = "              ";
const VERSUS: &str = " versus         ";

/// Lays two debug blocks side by side, "versus" between the header lines.
///
/// Both blocks follow the same template, so differing line counts (which
/// only happens when the two know a different number of moves) are refused
/// rather than misaligned.
pub fn dump_pokemon(user: &PokemonInst, opponent: &PokemonInst) -> Result<String, DisplayError> {
    let user_block = user.debug_string();
    let opponent_block = opponent.debug_string();
    let user_lines: Vec<&str> = user_block.lines().collect();
    let opponent_lines: Vec<&str> = opponent_block.lines().collect();

    if user_lines.len() != opponent_lines.len() {
        return Err(DisplayError::LineCountMismatch {
            left: user_lines.len(),
            right: opponent_lines.len(),
        });
    }

    let mut rows = user_lines.into_iter().zip(opponent_lines);
    let mut output = Vec::new();
    if let Some((left, right)) = rows.next() {
        output.push(format!("{}{}{}", left, VERSUS, right));
    }
    output.extend(rows.map(|(left, right)| format!("{}{}{}", left, COLUMN_GAP, right)));
    Ok(output.join("\n"))
}
