pub mod context;
pub mod fields;
pub mod html;
pub mod matcher;
pub mod signature;

pub use context::{ContextPropagator, GroupContext, GroupFields};
pub use fields::{RecordView, Side};
pub use matcher::{CandidateRecord, Matches, StructuralMatcher};
pub use signature::{
    ContainerSignature, GroupSignature, HeaderSignature, RecordSignature, ShapeSignature,
    SignatureSet,
};

#[cfg(test)]
mod tests;
