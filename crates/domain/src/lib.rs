//! Domain layer for FaultGate
//!
//! Contains the core fault-injection model: experiments, targeting rules,
//! effect descriptors, and domain errors. This layer has no async or I/O
//! dependencies and defines the ubiquitous language.

pub mod effects;
pub mod errors;
pub mod experiment;
pub mod labels;
pub mod wire;

pub use effects::{EffectDescriptor, FaultKind, Impact, ResponseOverride};
pub use errors::{DomainError, InjectedFault};
pub use experiment::{Experiment, MatchRule};
pub use labels::Labels;
pub use wire::{EffectWire, ExperimentWire};
