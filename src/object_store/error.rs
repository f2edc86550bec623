use thiserror::Error;

#[derive(Debug, Error)]
pub enum ObjectStoreError {
    #[error("I/O error {0}")]
    Io(#[from] std::io::Error),

    #[error("object listing failed {0}")]
    List(
        #[from]
        aws_smithy_runtime_api::client::result::SdkError<
            aws_sdk_s3::operation::list_objects_v2::ListObjectsV2Error,
            aws_smithy_runtime_api::http::Response,
        >,
    ),

    #[error("object download failed {0}")]
    Get(
        #[from]
        aws_smithy_runtime_api::client::result::SdkError<
            aws_sdk_s3::operation::get_object::GetObjectError,
            aws_smithy_runtime_api::http::Response,
        >,
    ),

    #[error("byte stream download error {0}")]
    ByteStream(#[from] aws_smithy_types::byte_stream::error::Error),

    #[error("object key '{0}' has no file name component")]
    NoFileName(String),
}
