use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct EventPayload {
  pub pull_request: Option<ContentNode>,
  pub issue: Option<ContentNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentNode {
  pub node_id: String,
  pub number: u64,
  #[serde(default)]
  pub labels: Vec<Label>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Label {
  pub name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ItemRecord {
  pub id: String,
  pub number: u64,
  pub labels: Vec<String>,
}

impl EventPayload {
  // Pull request wins when both are present.
  pub fn into_record(self) -> Option<ItemRecord> {
    let node = self.pull_request.or(self.issue)?;
    Some(ItemRecord {
      id: node.node_id,
      number: node.number,
      labels: node.labels.into_iter().filter_map(|l| l.name).collect(),
    })
  }
}

impl std::fmt::Display for ItemRecord {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "#{}", self.number)
  }
}
