//! Headless widgets and the contract they share.
//!
//! Every widget owns a typed options record, builds its subtree in the
//! host document on `render`, reacts to the events delivered to its
//! listeners and releases everything in `destroy`.

pub mod component;
pub mod options;
pub mod overlay;
pub mod registry;

pub mod accordion;
pub mod alert;
pub mod breadcrumbs;
pub mod button;
pub mod card;
pub mod carousel;
pub mod checkbox;
pub mod copy_button;
pub mod dropdown;
pub mod input;
pub mod modal;
pub mod pagination;
pub mod progress;
pub mod radio;
pub mod select;
pub mod slider;
pub mod table;
pub mod tabs;
pub mod toast;
pub mod tooltip;

pub use component::{emit, Bindings, Callback, Component, ComponentAction};
pub use options::{resolve, OptionsError};
pub use overlay::OverlayState;
pub use registry::{construct, Constructor, FromOptions, Registry, RegistryError};

pub use accordion::{Accordion, AccordionItem, AccordionOptions};
pub use alert::{Alert, AlertOptions};
pub use breadcrumbs::{Breadcrumbs, BreadcrumbsOptions, Crumb};
pub use button::{Button, ButtonOptions};
pub use card::{Card, CardAction, CardOptions};
pub use carousel::{Carousel, CarouselOptions, Slide};
pub use checkbox::{Checkbox, CheckboxGroup, CheckboxGroupOptions, CheckboxOptions, ChoiceOption};
pub use copy_button::{CopyButton, CopyButtonOptions};
pub use dropdown::{Dropdown, DropdownItem, DropdownOptions};
pub use input::{Input, InputOptions};
pub use modal::{Modal, ModalOptions};
pub use pagination::{Pagination, PaginationOptions};
pub use progress::{ProgressBar, ProgressOptions};
pub use radio::{Radio, RadioGroup, RadioGroupOptions, RadioOptions};
pub use select::{Select, SelectOption, SelectOptions};
pub use slider::{RangeSlider, RangeSliderOptions, Slider, SliderOptions};
pub use table::{Column, Row, SortDirection, Table, TableOptions};
pub use tabs::{TabItem, Tabs, TabsOptions};
pub use toast::{Toast, ToastOptions};
pub use tooltip::{Placement, Tooltip, TooltipOptions, Trigger};
