use crate::config::Route;

// Keeps label order and does not deduplicate: two labels routed to the
// same board yield two add attempts.
pub fn boards_for(routes: &[Route], labels: &[String]) -> Vec<u64> {
  labels
    .iter()
    .filter_map(|label| {
      routes
        .iter()
        .find(|route| route.label == *label)
        .map(|route| route.board)
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::Config;

  fn labels(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
  }

  #[test]
  fn unknown_labels_are_ignored() {
    let config = Config::default();
    assert!(boards_for(&config.routes, &labels(&["unmapped-label"])).is_empty());
  }

  #[test]
  fn known_labels_map_to_boards_in_label_order() {
    let config = Config::default();
    let boards = boards_for(
      &config.routes,
      &labels(&["@dev-productivity", "noise", "@execution"]),
    );
    assert_eq!(boards, vec![17, 24]);
  }

  #[test]
  fn duplicate_targets_are_kept() {
    let routes = vec![
      Route {
        label: "triage".into(),
        board: 8,
      },
      Route {
        label: "backlog".into(),
        board: 8,
      },
    ];
    let boards = boards_for(&routes, &labels(&["triage", "backlog"]));
    assert_eq!(boards, vec![8, 8]);
  }

  #[test]
  fn empty_label_list_yields_no_boards() {
    let config = Config::default();
    assert!(boards_for(&config.routes, &[]).is_empty());
  }
}
