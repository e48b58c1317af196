// ============================================================
// Layer 2 - Application / Use Cases
// ============================================================
// Coordinates the data layer for one run. No text processing
// and no printing happen here.

/// The load → clean → split → write workflow
pub mod preprocess_use_case;
