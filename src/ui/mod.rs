/// UI layer: sidebar controls, central-panel views, and artifact drawing.
pub mod panels;
pub mod plot;
pub mod table;
pub mod views;
