// gRPC surface of the engine. The generated code comes from proto/appraisal.proto.
pub mod generated {
    tonic::include_proto!("appraisal");
}

pub use generated::appraisal_engine_client::AppraisalEngineClient;
pub use generated::appraisal_engine_server::{AppraisalEngine, AppraisalEngineServer};
pub use generated::{
    cell, Cell as ProtoCell, EvaluationFailure as ProtoEvaluationFailure, EvaluationRequest,
    EvaluationResponse, IndicatorValue as ProtoIndicatorValue, LoadWorkbookRequest,
    LoadWorkbookResponse, Row as ProtoRow, SheetChunk, SheetRequest,
};

pub mod appraisal_service;
