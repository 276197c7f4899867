mod publish_record;

pub use publish_record::PublishRecordUseCase;
