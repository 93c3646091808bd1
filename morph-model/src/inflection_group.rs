use crate::error::{ConsistencyError, Result};
use crate::grouping_key::InflectionGroupingKey;
use crate::inflection::Inflection;

/// A child of an [`InflectionGroup`]: a raw inflection at the bottom level, a nested group above it.
#[derive(Clone, Debug, PartialEq)]
pub enum GroupMember {
    Leaf(Inflection),
    Nested(InflectionGroup),
}

impl GroupMember {
    pub fn as_leaf(&self) -> Option<&Inflection> {
        match self {
            GroupMember::Leaf(inflection) => Some(inflection),
            GroupMember::Nested(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&InflectionGroup> {
        match self {
            GroupMember::Leaf(_) => None,
            GroupMember::Nested(group) => Some(group),
        }
    }

    fn is_leaf(&self) -> bool {
        matches!(self, GroupMember::Leaf(_))
    }
}

impl From<Inflection> for GroupMember {
    fn from(inflection: Inflection) -> Self {
        GroupMember::Leaf(inflection)
    }
}

impl From<InflectionGroup> for GroupMember {
    fn from(group: InflectionGroup) -> Self {
        GroupMember::Nested(group)
    }
}

/// One node of the display forest. All members of a group are of the same variant.
#[derive(Clone, Debug, PartialEq)]
pub struct InflectionGroup {
    grouping_key: InflectionGroupingKey,
    members: Vec<GroupMember>,
    sort_key: Option<u32>,
}

impl InflectionGroup {
    pub fn new(
        grouping_key: InflectionGroupingKey,
        members: Vec<GroupMember>,
        sort_key: Option<u32>,
    ) -> Result<Self> {
        if let Some(first) = members.first() {
            if members.iter().any(|m| m.is_leaf() != first.is_leaf()) {
                return Err(ConsistencyError::MixedGroupMembers.into());
            }
        }
        Ok(Self::from_parts(grouping_key, members, sort_key))
    }

    /// Builds a group from members already known to be of one variant.
    pub(crate) fn from_parts(
        grouping_key: InflectionGroupingKey,
        members: Vec<GroupMember>,
        sort_key: Option<u32>,
    ) -> Self {
        Self {
            grouping_key,
            members,
            sort_key,
        }
    }

    /// Adds a member after the existing ones.
    pub fn append(&mut self, member: impl Into<GroupMember>) -> Result<()> {
        let member = member.into();
        if let Some(first) = self.members.first() {
            if first.is_leaf() != member.is_leaf() {
                return Err(ConsistencyError::MixedGroupMembers.into());
            }
        }
        self.members.push(member);
        Ok(())
    }

    pub fn grouping_key(&self) -> &InflectionGroupingKey {
        &self.grouping_key
    }

    pub fn sort_key(&self) -> Option<u32> {
        self.sort_key
    }

    pub fn members(&self) -> &[GroupMember] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Direct inflection members; empty for a group of groups.
    pub fn leaves(&self) -> impl Iterator<Item = &Inflection> + '_ {
        self.members.iter().filter_map(GroupMember::as_leaf)
    }

    /// Direct nested groups; empty for a bottom-level group.
    pub fn groups(&self) -> impl Iterator<Item = &InflectionGroup> + '_ {
        self.members.iter().filter_map(GroupMember::as_group)
    }

    /// Every inflection below this group, in tree order.
    pub fn inflections(&self) -> Vec<&Inflection> {
        let mut out = Vec::new();
        self.collect_inflections(&mut out);
        out
    }

    fn collect_inflections<'a>(&'a self, out: &mut Vec<&'a Inflection>) {
        for member in &self.members {
            match member {
                GroupMember::Leaf(inflection) => out.push(inflection),
                GroupMember::Nested(group) => group.collect_inflections(out),
            }
        }
    }

    /// Number of levels of groups from here down to the inflections, this one included.
    pub fn depth(&self) -> usize {
        1 + self.groups().map(InflectionGroup::depth).max().unwrap_or(0)
    }
}

/// Orders sibling groups by descending sort key. The sort is stable, so groups with
/// equal keys keep their insertion order. Groups without a key go last.
pub fn sort_siblings(groups: &mut [InflectionGroup]) {
    groups.sort_by(|a, b| b.sort_key.cmp(&a.sort_key));
}
