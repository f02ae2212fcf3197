pub mod steering_output;
