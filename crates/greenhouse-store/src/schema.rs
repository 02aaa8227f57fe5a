//! Document store database schema.

/// SQL to create the documents table.
///
/// Every aggregate type shares the table; `collection` holds the
/// aggregate type tag and `body` the aggregate's primitives.
pub const CREATE_DOCUMENTS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS documents (
    tenant_id   UUID NOT NULL,
    collection  VARCHAR(64) NOT NULL,
    id          UUID NOT NULL,
    body        JSONB NOT NULL,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    PRIMARY KEY (tenant_id, collection, id)
);

CREATE INDEX IF NOT EXISTS idx_documents_collection_created_at
    ON documents (tenant_id, collection, created_at);

CREATE INDEX IF NOT EXISTS idx_documents_body
    ON documents USING GIN (body jsonb_path_ops);
";
