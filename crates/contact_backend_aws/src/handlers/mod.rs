pub mod say_hello;
