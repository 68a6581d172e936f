pub mod operation_dispatcher;
pub mod operation_parser_service;
pub mod request_controller_service;
pub mod store;

pub use operation_dispatcher::OperationDispatcher;
pub use operation_parser_service::OperationParserService;
pub use request_controller_service::RequestControllerService;
pub use store::Store;
