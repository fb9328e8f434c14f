//! Status enumerations for improvement actions and workflow steps.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle status of an improvement action.
///
/// Variants are declared in lifecycle order, so the derived ordering can be
/// used to check that a status never regresses.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
pub enum ActionStatus {
    /// Action is being drafted and has not been submitted
    #[default]
    #[serde(rename = "Borrador")]
    Borrador,

    /// Waiting for the cause analysis and action plan
    #[serde(rename = "Pendiente Análisis")]
    PendienteAnalisis,

    /// Waiting for verification of the implemented actions
    #[serde(rename = "Pendiente Comprobación")]
    PendienteComprobacion,

    /// Waiting for formal closure
    #[serde(rename = "Pendiente de Cierre")]
    PendienteCierre,

    /// Closed; nothing left outstanding
    #[serde(rename = "Finalizada")]
    Finalizada,
}

impl ActionStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [ActionStatus; 5] = [
        ActionStatus::Borrador,
        ActionStatus::PendienteAnalisis,
        ActionStatus::PendienteComprobacion,
        ActionStatus::PendienteCierre,
        ActionStatus::Finalizada,
    ];

    /// Label used in storage and user-facing output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionStatus::Borrador => "Borrador",
            ActionStatus::PendienteAnalisis => "Pendiente Análisis",
            ActionStatus::PendienteComprobacion => "Pendiente Comprobación",
            ActionStatus::PendienteCierre => "Pendiente de Cierre",
            ActionStatus::Finalizada => "Finalizada",
        }
    }

    /// Short ASCII identifier accepted on the command line.
    pub fn slug(&self) -> &'static str {
        match self {
            ActionStatus::Borrador => "borrador",
            ActionStatus::PendienteAnalisis => "pendiente-analisis",
            ActionStatus::PendienteComprobacion => "pendiente-comprobacion",
            ActionStatus::PendienteCierre => "pendiente-cierre",
            ActionStatus::Finalizada => "finalizada",
        }
    }

    /// The status that follows this one, or `None` once finalized.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use qualitas_core::models::ActionStatus;
    ///
    /// assert_eq!(
    ///     ActionStatus::Borrador.next(),
    ///     Some(ActionStatus::PendienteAnalisis)
    /// );
    /// assert_eq!(ActionStatus::Finalizada.next(), None);
    /// ```
    pub fn next(&self) -> Option<ActionStatus> {
        match self {
            ActionStatus::Borrador => Some(ActionStatus::PendienteAnalisis),
            ActionStatus::PendienteAnalisis => Some(ActionStatus::PendienteComprobacion),
            ActionStatus::PendienteComprobacion => Some(ActionStatus::PendienteCierre),
            ActionStatus::PendienteCierre => Some(ActionStatus::Finalizada),
            ActionStatus::Finalizada => None,
        }
    }

    /// Whether the action still has work outstanding.
    pub fn is_open(&self) -> bool {
        *self != ActionStatus::Finalizada
    }
}

impl FromStr for ActionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        ActionStatus::ALL
            .into_iter()
            .find(|status| {
                status.as_str().eq_ignore_ascii_case(needle)
                    || status.slug().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| format!("Invalid action status: {s}"))
    }
}

/// Status of a single workflow step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum StepStatus {
    /// Step has not been started
    #[default]
    #[serde(rename = "Pendiente")]
    Pendiente,

    /// Step is being worked on
    #[serde(rename = "En Curso")]
    EnCurso,

    /// Step has been completed
    #[serde(rename = "Completado")]
    Completado,
}

impl StepStatus {
    /// Label used in storage and user-facing output.
    pub fn as_str(&self) -> &'static str {
        match self {
            StepStatus::Pendiente => "Pendiente",
            StepStatus::EnCurso => "En Curso",
            StepStatus::Completado => "Completado",
        }
    }

    /// Status with an icon prefix for display.
    pub fn with_icon(&self) -> &'static str {
        match self {
            StepStatus::Completado => "✓ Completado",
            StepStatus::EnCurso => "➤ En Curso",
            StepStatus::Pendiente => "○ Pendiente",
        }
    }
}

impl FromStr for StepStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pendiente" => Ok(StepStatus::Pendiente),
            "en curso" | "en_curso" | "encurso" => Ok(StepStatus::EnCurso),
            "completado" => Ok(StepStatus::Completado),
            _ => Err(format!("Invalid step status: {s}")),
        }
    }
}
