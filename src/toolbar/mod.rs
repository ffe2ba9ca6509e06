pub mod toolbar;

pub use toolbar::{
    resolve_image_prompt, resolve_link_prompt, HeadingChoice, ItemState, ToolbarAction,
    ToolbarItem, ToolbarState,
};
