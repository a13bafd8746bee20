use super::definition::NodeHandle;
use crate::error::ConversionError;

/// A trait for payloads that can be converted into canonical `NodeHandle`s.
///
/// The explosion core only ever sees `NodeHandle`s. Anything that carries a
/// pipeline graph (the GraphQL fragment shape in [`crate::graphql`], a cached
/// snapshot, a hand-built fixture) plugs in by implementing this trait.
///
/// # Example
///
/// ```rust,no_run
/// use handle_graph::error::ConversionError;
/// use handle_graph::model::{Definition, IntoHandles, Node, NodeHandle};
///
/// struct Step { name: String, op: String }
/// struct Linear { steps: Vec<Step> }
///
/// impl IntoHandles for Linear {
///     fn into_handles(self) -> Result<Vec<NodeHandle>, ConversionError> {
///         Ok(self
///             .steps
///             .into_iter()
///             .map(|s| NodeHandle::new(s.name.clone(), Node {
///                 name: s.name,
///                 definition: Definition::Simple { name: s.op },
///                 inputs: vec![],
///                 outputs: vec![],
///             }))
///             .collect())
///     }
/// }
/// ```
pub trait IntoHandles {
    /// Consumes the payload and converts it into node-handles across all depths.
    fn into_handles(self) -> Result<Vec<NodeHandle>, ConversionError>;
}

impl IntoHandles for Vec<NodeHandle> {
    fn into_handles(self) -> Result<Vec<NodeHandle>, ConversionError> {
        Ok(self)
    }
}
