pub mod confirm_dialog;
pub mod data_table;
pub mod form_modal;
pub mod main_view;
pub mod roster_panel;
pub mod search_bar;
pub mod toast;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use confirm_dialog::{ConfirmDialog, ConfirmDialogProps};
pub use data_table::{DataTable, DataTableProps, TableContent};
pub use form_modal::{FormModal, FormModalProps};
pub use main_view::{search_bar_area, MainView, MainViewProps};
pub use roster_panel::{RosterPanel, RosterPanelProps};
pub use search_bar::{SearchBar, SearchBarProps};
pub use toast::{ToastStack, ToastStackProps};
