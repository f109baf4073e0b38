pub mod chat_store;
