//! Trade-off map engine: turns a free-text dump of considerations into a small
//! decision model and ranks options against a stated preference point.
//!
//! The crate is the pure core behind an interactive decision map. A host shell
//! (web page, desktop UI, test harness) owns presentation; it feeds raw text and
//! pointer events in and renders the [`engine::Action`]s, statuses, and
//! snapshots that come back out. Nothing here touches a real canvas, the network,
//! or the filesystem.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Model owner used by the shell: intake, edits, selection, pointer events |
//! | [`intake`] | Considerations text → trade-off axes (ordered heuristics) |
//! | [`model`] | Dimensions, options, the passable region, and option defaults |
//! | [`scoring`] | Distance-to-preference, region membership, composite score, top-N |
//! | [`geometry`] | Unit-square ↔ canvas projection and point-in-polygon |
//! | [`hit`] | Hit-testing vertex handles and option markers in canvas space |
//! | [`input`] | Pointer targets and the drag state machine |
//! | [`config`] | Canvas geometry, hit radii, and scoring weights |
//! | [`consts`] | Shared constants (candidate cap, pole positions, default region) |

pub mod config;
pub mod consts;
pub mod engine;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod intake;
pub mod model;
pub mod scoring;
