//! Category — the read-only grouping every question belongs to.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

/// Category names inserted by the server's seeding step, in id order.
pub const DEFAULT_CATEGORIES: [&str; 6] =
  ["Science", "Art", "Geography", "History", "Entertainment", "Sports"];

/// Primary key of a [`Category`].
///
/// The id `0` is never assigned by the store; quiz requests use it to mean
/// "every category".
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
  Deserialize,
)]
#[serde(transparent)]
pub struct CategoryId(pub i64);

impl CategoryId {
  /// The sentinel the quiz endpoint uses for "no category restriction".
  pub const ALL: CategoryId = CategoryId(0);

  pub fn is_all(self) -> bool { self == Self::ALL }
}

impl fmt::Display for CategoryId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
  pub id:   CategoryId,
  #[serde(rename = "type")]
  pub kind: String,
}

/// The `{ "<id>": "<type>" }` shape every listing response carries.
pub type CategoryMap = BTreeMap<CategoryId, String>;

pub fn category_map(categories: &[Category]) -> CategoryMap {
  categories
    .iter()
    .map(|c| (c.id, c.kind.clone()))
    .collect()
}
