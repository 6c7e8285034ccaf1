pub mod respond;
