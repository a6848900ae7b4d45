//! Prelude module - common imports for taller users
//!
//! ```rust
//! use taller::prelude::*;
//! ```

pub use crate::{
    CellValue,
    // Connection and stores
    Connection,
    CostSheet,
    CsvSheetStore,
    // Workflow
    EditForm,
    EditorError,
    MemorySheetStore,
    PartsLine,
    SaveReceipt,
    SheetLayout,
    SheetRow,
    SheetStore,
    Status,
    TallerConfig,
    TicketEdits,
    TicketEditor,
    TicketId,
};
