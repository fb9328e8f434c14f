//! Filter types for querying improvement actions.

use super::ActionStatus;
use crate::{
    error::{Result, TrackerError},
    params::ListActions,
};

/// Filter options for querying actions. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionFilter {
    /// Only actions in this status
    pub status: Option<ActionStatus>,

    /// Only actions of this exact type
    pub action_type: Option<String>,

    /// Only actions in this exact category
    pub category: Option<String>,

    /// Skip finalized actions
    pub open_only: bool,
}

impl ActionFilter {
    /// Filter matching every action that is not finalized.
    pub fn open() -> Self {
        Self {
            open_only: true,
            ..Default::default()
        }
    }
}

impl TryFrom<&ListActions> for ActionFilter {
    type Error = TrackerError;

    /// Convert ListActions parameters to a filter, validating the status.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use qualitas_core::{models::{ActionFilter, ActionStatus}, params::ListActions};
    ///
    /// let params = ListActions {
    ///     status: Some("pendiente-analisis".to_string()),
    ///     ..Default::default()
    /// };
    /// let filter = ActionFilter::try_from(&params).unwrap();
    /// assert_eq!(filter.status, Some(ActionStatus::PendienteAnalisis));
    /// ```
    fn try_from(params: &ListActions) -> Result<Self> {
        let status = params
            .status
            .as_deref()
            .map(str::parse::<ActionStatus>)
            .transpose()
            .map_err(|reason| TrackerError::validation("status").with_reason(reason))?;

        Ok(Self {
            status,
            action_type: params.action_type.clone(),
            category: params.category.clone(),
            open_only: !params.include_closed && status.is_none(),
        })
    }
}
