//! Collection wrapper types for displaying groups of actions.

use std::{fmt, ops::Index};

use crate::models::ImprovementAction;

/// Newtype wrapper rendering a list of actions as a compact markdown list.
///
/// # Examples
///
/// ```rust
/// use qualitas_core::display::Actions;
///
/// assert_eq!(Actions(vec![]).to_string(), "No actions found.\n");
/// ```
pub struct Actions(pub Vec<ImprovementAction>);

impl Actions {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ImprovementAction> {
        self.0.iter()
    }
}

impl Index<usize> for Actions {
    type Output = ImprovementAction;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for Actions {
    type Item = ImprovementAction;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Actions {
    type Item = &'a ImprovementAction;
    type IntoIter = std::slice::Iter<'a, ImprovementAction>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Actions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No actions found.");
        }

        for action in &self.0 {
            writeln!(f, "## {} (ID: {})", action.title, action.id)?;
            writeln!(f)?;
            writeln!(f, "- **Status**: {}", action.status)?;
            writeln!(
                f,
                "- **Type**: {} / {}",
                action.action_type, action.category
            )?;
            writeln!(f, "- **Responsible**: {}", action.responsible_group_id)?;
            writeln!(f, "- **Created**: {}", action.creation_date)?;
            writeln!(f)?;
        }
        Ok(())
    }
}
