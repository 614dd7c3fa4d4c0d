//! Interactive UML-style diagram canvas: shapes, typed connectors, groups and
//! the depth model that decides what is hit and what paints on top.

pub mod app;
pub mod canvas;
pub mod diagram;
pub mod geometry;
pub mod layers;
pub mod model;

pub use app::DiagramApp;
pub use canvas::{Canvas, Guide, PointerEvent, RepaintSink, Tool};
pub use diagram::{Diagram, PaintItem};
pub use layers::{DEPTH_MAX, DEPTH_TOP, LayerAllocator};
pub use model::{Connector, ConnectorKind, Label, LabelShape, Rgba, Shape, ShapeId, ShapeKind};
