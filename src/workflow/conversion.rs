use super::definition::SubsectionDefinition;
use crate::error::SubsectionConversionError;

/// A trait for custom data models that can be converted into a weft
/// [`SubsectionDefinition`].
///
/// This is the primary extension point for making weft format-agnostic. The
/// shipped loader understands the standard JSON artifact format; by
/// implementing this trait on your own structs you provide a translation
/// layer that lets the merge engine process any authoring format.
///
/// # Example
///
/// ```rust,no_run
/// use weft::error::SubsectionConversionError;
/// use weft::graph::NodeKind;
/// use weft::workflow::{IntoSubsection, NodeDefinition, SubsectionDefinition};
///
/// // 1. Define your custom structs for parsing your format.
/// struct MyStep { id: String, step_type: String }
/// struct MyFragment { name: String, steps: Vec<MyStep> }
///
/// // 2. Implement `IntoSubsection` for your fragment struct.
/// impl IntoSubsection for MyFragment {
///     fn into_subsection(self) -> Result<SubsectionDefinition, SubsectionConversionError> {
///         let mut nodes = Vec::new();
///         for step in self.steps {
///             let kind = match step.step_type.as_str() {
///                 "start" => NodeKind::Trigger,
///                 "end" => NodeKind::Terminal,
///                 other => {
///                     return Err(SubsectionConversionError::ValidationError(format!(
///                         "unknown step type '{}'",
///                         other
///                     )));
///                 }
///             };
///             nodes.push(NodeDefinition {
///                 display_name: step.id.clone(),
///                 id: step.id,
///                 kind,
///                 config: Default::default(),
///             });
///         }
///
///         Ok(SubsectionDefinition {
///             name: self.name,
///             nodes,
///             connections: vec![], // Convert your edges here as well
///             boundary: Default::default(),
///         })
///     }
/// }
/// ```
pub trait IntoSubsection {
    /// Consumes the object and converts it into a weft-compatible
    /// subsection definition.
    fn into_subsection(self) -> Result<SubsectionDefinition, SubsectionConversionError>;
}
