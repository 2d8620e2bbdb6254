use crate::{
    models::analysis::{BlockKind, TextBlock},
    services::ports::{AnalysisError, TextDetector},
};
use aws_sdk_textract::{
    self as textract,
    error::{DisplayErrorContext, SdkError},
    operation::detect_document_text::DetectDocumentTextError,
    types::{Block, BlockType, Document, S3Object},
};

/// Synchronous `DetectDocumentText` against objects already in S3.
///
/// The document is referenced by bucket and name; its bytes never pass
/// through this process.
#[derive(Clone, Debug)]
pub struct TextractDetector {
    inner: textract::Client,
}

impl TextractDetector {
    pub fn new(inner: textract::Client) -> Self {
        Self { inner }
    }
}

impl TextDetector for TextractDetector {
    #[tracing::instrument(skip(self))]
    async fn detect_text(&self, bucket: &str, key: &str) -> Result<Vec<TextBlock>, AnalysisError> {
        let document = Document::builder()
            .s3_object(S3Object::builder().bucket(bucket).name(key).build())
            .build();

        let output = self
            .inner
            .detect_document_text()
            .document(document)
            .send()
            .await
            .map_err(classify_sdk_error)?;

        Ok(output.blocks().iter().map(to_text_block).collect())
    }
}

fn classify_sdk_error<R>(err: SdkError<DetectDocumentTextError, R>) -> AnalysisError
where
    R: std::fmt::Debug + Send + Sync + 'static,
{
    match err {
        SdkError::ServiceError(context) => classify_service_error(context.into_err()),
        other => AnalysisError::Service(anyhow::anyhow!("{}", DisplayErrorContext(other))),
    }
}

/// Split the service's rejections of the document itself from every other
/// failure.
fn classify_service_error(err: DetectDocumentTextError) -> AnalysisError {
    let message = DisplayErrorContext(&err).to_string();
    if err.is_unsupported_document_exception() {
        AnalysisError::UnsupportedDocument(message)
    } else if err.is_invalid_parameter_exception() {
        AnalysisError::InvalidParameter(message)
    } else {
        AnalysisError::Service(anyhow::anyhow!(message))
    }
}

fn to_text_block(block: &Block) -> TextBlock {
    let kind = match block.block_type() {
        Some(BlockType::Line) => BlockKind::Line,
        Some(BlockType::Word) => BlockKind::Word,
        Some(other) => BlockKind::Other(other.as_str().to_string()),
        None => BlockKind::Other("UNKNOWN".to_string()),
    };
    TextBlock::new(kind, block.text().map(str::to_string))
}
