//! End-to-end sweep scenarios driven by scripted probers.


mod sweep;
