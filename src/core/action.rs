//! Turn specifications submitted by player actors.
//!
//! Actions carry raw coordinates exactly as the actor chose them: nothing
//! here is validated, since rule-checking what an actor submitted is the
//! referee's job. Serialized forms match the protocol shapes
//! `{"type":"place","wid":..,"xy":[..]}`,
//! `{"type":"move","xy1":[..],"xy2":[..]}` and
//! `{"type":"build","xy1":[..],"xy2":[..]}`.

use serde::{Deserialize, Serialize};

/// Request to place a worker during the init phase.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaceAction {
    /// Worker number to place (per-player).
    pub wid: u8,
    /// Target coordinates.
    pub xy: [i32; 2],
}

/// Request to move a worker from `xy1` to `xy2`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveAction {
    /// Coordinates of the worker to move.
    pub xy1: [i32; 2],
    /// Destination coordinates.
    pub xy2: [i32; 2],
}

/// Request to build a floor at `xy2` with the worker at `xy1`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuildAction {
    /// Coordinates of the building worker.
    pub xy1: [i32; 2],
    /// Build target coordinates.
    pub xy2: [i32; 2],
}

/// Any turn specification, tagged the way the wire protocol tags them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Action {
    Place(PlaceAction),
    Move(MoveAction),
    Build(BuildAction),
}

impl From<PlaceAction> for Action {
    fn from(action: PlaceAction) -> Self {
        Action::Place(action)
    }
}

impl From<MoveAction> for Action {
    fn from(action: MoveAction) -> Self {
        Action::Move(action)
    }
}

impl From<BuildAction> for Action {
    fn from(action: BuildAction) -> Self {
        Action::Build(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_serialization_shape() {
        let action = Action::from(PlaceAction { wid: 0, xy: [2, 3] });
        let json = serde_json::to_value(&action).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"type": "place", "wid": 0, "xy": [2, 3]})
        );
    }

    #[test]
    fn test_move_serialization_shape() {
        let action = Action::from(MoveAction {
            xy1: [0, 0],
            xy2: [1, 1],
        });
        let json = serde_json::to_value(&action).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"type": "move", "xy1": [0, 0], "xy2": [1, 1]})
        );
    }

    #[test]
    fn test_build_deserialization() {
        let action: Action =
            serde_json::from_str(r#"{"type":"build","xy1":[2,2],"xy2":[2,3]}"#).unwrap();

        assert_eq!(
            action,
            Action::Build(BuildAction {
                xy1: [2, 2],
                xy2: [2, 3],
            })
        );
    }

    #[test]
    fn test_actions_carry_unvalidated_coordinates() {
        // Out-of-range coordinates must survive the type layer so the
        // referee can reject them through the rule checker.
        let action = MoveAction {
            xy1: [-1, 0],
            xy2: [99, 0],
        };
        assert_eq!(action.xy1, [-1, 0]);
    }
}
