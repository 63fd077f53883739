pub mod applicants;
pub mod attachments;
pub mod customers;
pub mod invoices;
