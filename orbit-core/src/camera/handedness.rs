use glam::Vec3;
use serde::{Deserialize, Serialize};

//
// ──────────────────────────────────────────────────────────────
//   Handedness
//
//   Right: eye space looks down -Z, so theta = phi = 0 puts the
//          eye on +Z.
//   Left:  eye space looks down +Z, so theta = phi = 0 puts the
//          eye on -Z.
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handedness
{
  #[default]
  Right,
  Left,
}

impl Handedness
{
  /// Viewing direction in eye space.
  pub fn forward(self) -> Vec3
  {
    match self
    {
      Handedness::Right => Vec3::NEG_Z,
      Handedness::Left => Vec3::Z,
    }
  }
}

#[cfg(test)]
mod tests
{
  use super::*;

  #[test]
  fn forward_axis_flips_with_handedness()
  {
    assert_eq!(Handedness::Right.forward(), Vec3::NEG_Z);
    assert_eq!(Handedness::Left.forward(), Vec3::Z);
    assert_eq!(Handedness::default(), Handedness::Right);
  }

  #[test]
  fn parses_lowercase_names()
  {
    let left: Handedness = serde_json::from_str("\"left\"").unwrap();
    let right: Handedness = serde_json::from_str("\"right\"").unwrap();

    assert_eq!(left, Handedness::Left);
    assert_eq!(right, Handedness::Right);
    assert!(serde_json::from_str::<Handedness>("\"ambidextrous\"").is_err());
  }
}
