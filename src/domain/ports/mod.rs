mod document_qa_port;

pub use document_qa_port::DocumentQaPort;
